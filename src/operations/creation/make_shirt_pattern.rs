use serde::{Deserialize, Serialize};

use crate::geometry::Segment;
use crate::math::Point2;

/// Body measurements driving the shirt outline.
///
/// No validation is performed: zero or negative values are accepted and
/// simply produce degenerate geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatternParams {
    pub height: f64,
    pub width: f64,
    pub sleeve_length: f64,
    pub collar_width: f64,
}

impl PatternParams {
    /// Creates a new set of measurements.
    #[must_use]
    pub fn new(height: f64, width: f64, sleeve_length: f64, collar_width: f64) -> Self {
        Self {
            height,
            width,
            sleeve_length,
            collar_width,
        }
    }
}

impl Default for PatternParams {
    /// The reference garment served by the pattern endpoints.
    fn default() -> Self {
        Self::new(100.0, 90.0, 70.0, 40.0)
    }
}

/// Builds the fixed-topology shirt outline from [`PatternParams`].
#[derive(Debug, Clone, Copy)]
pub struct MakeShirtPattern {
    params: PatternParams,
}

impl MakeShirtPattern {
    /// Creates a new `MakeShirtPattern` operation.
    #[must_use]
    pub fn new(params: PatternParams) -> Self {
        Self { params }
    }

    /// Executes the operation, returning the six outline segments.
    ///
    /// The order is fixed: right side, sleeve curve, shoulder, left side,
    /// collar curve, right sleeve.
    #[must_use]
    pub fn execute(&self) -> Vec<Segment> {
        let PatternParams {
            height,
            width,
            sleeve_length,
            collar_width,
        } = self.params;

        let p0 = Point2::new(0.0, 0.0);
        let p1 = Point2::new(width, 0.0);
        let p2 = Point2::new(width, height * 0.4);
        let p3 = Point2::new(width * 0.5, height);
        let p4 = Point2::new(0.0, height);
        let p5 = Point2::new(0.0, 0.0);

        let sleeve = Segment::bezier(
            p2,
            Point2::new(width, height * 0.6),
            Point2::new(width * 0.7, height * 0.8),
            p3,
        );
        let collar = Segment::bezier(
            p0,
            Point2::new(width * 0.2, -collar_width),
            Point2::new(width * 0.8, -collar_width),
            p1,
        );
        // Extends outward from the armhole by the sleeve length.
        let right_sleeve = Segment::bezier(
            p2,
            Point2::new(width + sleeve_length * 0.2, height * 0.5),
            Point2::new(width + sleeve_length * 0.3, height * 0.7),
            Point2::new(width + sleeve_length, height * 0.6),
        );

        vec![
            Segment::line(p1, p2),
            sleeve,
            Segment::line(p3, p4),
            Segment::line(p4, p5),
            collar,
            right_sleeve,
        ]
    }
}

/// Generates the shirt outline for the given measurements.
#[must_use]
pub fn generate_segments(params: &PatternParams) -> Vec<Segment> {
    MakeShirtPattern::new(*params).execute()
}
