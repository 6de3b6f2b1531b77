mod make_shirt_pattern;

pub use make_shirt_pattern::{generate_segments, MakeShirtPattern, PatternParams};
