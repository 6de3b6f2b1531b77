pub mod error;
pub mod geometry;
pub mod io;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use error::{Result, SeamlineError};
pub use geometry::{Segment, SegmentKind};
pub use io::{
    export_from_segments, export_pattern, pattern_data, read_line_entities, ExportParams,
    SegmentRecord,
};
pub use operations::creation::{generate_segments, PatternParams};
pub use operations::merge::{merge_layer, LineEntity, MergeParams, MergedPolyline, VertexKeyMode};
pub use tessellation::{flatten, FlattenParams};
