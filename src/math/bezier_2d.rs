/// 2D cubic Bezier evaluation.
///
/// `B(t) = (1-t)³·p0 + 3(1-t)²t·c1 + 3(1-t)t²·c2 + t³·p3`
use super::{Point2, Vector2};

/// Returns the affine combination `Σ wᵢ·pᵢ` of the given points.
///
/// The weights are expected to sum to one; no normalization is applied.
#[must_use]
pub fn weighted_sum(points: &[Point2], weights: &[f64]) -> Point2 {
    let coords = points
        .iter()
        .zip(weights)
        .fold(Vector2::zeros(), |acc, (p, w)| acc + p.coords * *w);
    Point2::from(coords)
}

/// Returns the four Bernstein weights of a cubic at parameter `t`.
#[must_use]
pub fn cubic_bernstein(t: f64) -> [f64; 4] {
    let s = 1.0 - t;
    [s * s * s, 3.0 * s * s * t, 3.0 * s * t * t, t * t * t]
}

/// Evaluates a cubic Bezier curve at parameter `t`.
#[must_use]
pub fn cubic_bezier_point(p0: &Point2, c1: &Point2, c2: &Point2, p3: &Point2, t: f64) -> Point2 {
    weighted_sum(&[*p0, *c1, *c2, *p3], &cubic_bernstein(t))
}
