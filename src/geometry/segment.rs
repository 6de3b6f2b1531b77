use crate::math::Point2;

/// Discriminator for the two segment kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Line,
    Bezier,
}

impl SegmentKind {
    /// Wire name used in segment payloads (`"line"` or `"bezier"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bezier => "bezier",
        }
    }

    /// Number of points a segment of this kind carries.
    #[must_use]
    pub fn point_count(self) -> usize {
        match self {
            Self::Line => 2,
            Self::Bezier => 4,
        }
    }
}

/// One primitive element of a pattern outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Straight line between two points.
    Line { from: Point2, to: Point2 },
    /// Cubic Bezier with endpoints `p0`/`p3` and control points `c1`/`c2`.
    Bezier {
        p0: Point2,
        c1: Point2,
        c2: Point2,
        p3: Point2,
    },
}

impl Segment {
    /// Creates a line segment.
    #[must_use]
    pub fn line(from: Point2, to: Point2) -> Self {
        Self::Line { from, to }
    }

    /// Creates a cubic Bezier segment.
    #[must_use]
    pub fn bezier(p0: Point2, c1: Point2, c2: Point2, p3: Point2) -> Self {
        Self::Bezier { p0, c1, c2, p3 }
    }

    /// Returns the kind of this segment.
    #[must_use]
    pub fn kind(&self) -> SegmentKind {
        match self {
            Self::Line { .. } => SegmentKind::Line,
            Self::Bezier { .. } => SegmentKind::Bezier,
        }
    }

    /// Returns the defining points in order (2 for lines, 4 for Beziers).
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        match *self {
            Self::Line { from, to } => vec![from, to],
            Self::Bezier { p0, c1, c2, p3 } => vec![p0, c1, c2, p3],
        }
    }

    /// Start point of the segment.
    #[must_use]
    pub fn start(&self) -> Point2 {
        match *self {
            Self::Line { from, .. } => from,
            Self::Bezier { p0, .. } => p0,
        }
    }

    /// End point of the segment.
    #[must_use]
    pub fn end(&self) -> Point2 {
        match *self {
            Self::Line { to, .. } => to,
            Self::Bezier { p3, .. } => p3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_count_matches_kind() {
        let line = Segment::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        let bez = Segment::bezier(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 1.0),
            Point2::new(3.0, 0.0),
        );
        assert_eq!(line.points().len(), line.kind().point_count());
        assert_eq!(bez.points().len(), bez.kind().point_count());
    }

    #[test]
    fn start_and_end() {
        let bez = Segment::bezier(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 1.0),
            Point2::new(3.0, 0.0),
        );
        assert_eq!(bez.start(), Point2::new(0.0, 0.0));
        assert_eq!(bez.end(), Point2::new(3.0, 0.0));
    }

    #[test]
    fn kind_names() {
        assert_eq!(SegmentKind::Line.as_str(), "line");
        assert_eq!(SegmentKind::Bezier.as_str(), "bezier");
    }
}
