mod flatten_bezier;

pub use flatten_bezier::{flatten, flatten_segment, FlattenBezier};

use serde::{Deserialize, Serialize};

/// Default number of samples taken along a Bezier curve.
pub const DEFAULT_FLATTEN_STEPS: usize = 20;

/// Parameters controlling Bezier flattening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenParams {
    /// Number of evenly spaced samples over `t ∈ [0, 1]`, endpoints included.
    pub steps: usize,
}

impl Default for FlattenParams {
    fn default() -> Self {
        Self {
            steps: DEFAULT_FLATTEN_STEPS,
        }
    }
}
