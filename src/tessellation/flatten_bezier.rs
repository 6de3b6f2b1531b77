use crate::geometry::Segment;
use crate::math::bezier_2d::cubic_bezier_point;
use crate::math::Point2;

use super::FlattenParams;

/// Approximates a cubic Bezier by sampled points.
#[derive(Debug, Clone, Copy)]
pub struct FlattenBezier {
    control: [Point2; 4],
    params: FlattenParams,
}

impl FlattenBezier {
    /// Creates a new flattening operation for the curve `p0 → c1 → c2 → p3`.
    #[must_use]
    pub fn new(p0: Point2, c1: Point2, c2: Point2, p3: Point2, params: FlattenParams) -> Self {
        Self {
            control: [p0, c1, c2, p3],
            params,
        }
    }

    /// Samples the curve at `steps` evenly spaced parameters over `[0, 1]`.
    ///
    /// The first point is exactly `p0` and the last exactly `p3`. One step
    /// yields just `p0`; zero steps yield nothing.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        let [p0, c1, c2, p3] = &self.control;
        let steps = self.params.steps;
        match steps {
            0 => Vec::new(),
            1 => vec![*p0],
            _ => {
                #[allow(clippy::cast_precision_loss)]
                let last = (steps - 1) as f64;
                (0..steps)
                    .map(|i| {
                        #[allow(clippy::cast_precision_loss)]
                        let t = i as f64 / last;
                        cubic_bezier_point(p0, c1, c2, p3, t)
                    })
                    .collect()
            }
        }
    }
}

/// Samples the cubic Bezier `p0 → c1 → c2 → p3` at `steps` parameters.
///
/// Consecutive pairs of the returned points are the straight sub-segments
/// written on export.
#[must_use]
pub fn flatten(p0: Point2, c1: Point2, c2: Point2, p3: Point2, steps: usize) -> Vec<Point2> {
    FlattenBezier::new(p0, c1, c2, p3, FlattenParams { steps }).execute()
}

/// Converts any segment into a chain of points: lines pass through as
/// their two endpoints, Beziers are sampled.
#[must_use]
pub fn flatten_segment(segment: &Segment, params: FlattenParams) -> Vec<Point2> {
    match *segment {
        Segment::Line { from, to } => vec![from, to],
        Segment::Bezier { p0, c1, c2, p3 } => FlattenBezier::new(p0, c1, c2, p3, params).execute(),
    }
}
