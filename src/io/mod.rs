pub mod dxf_export;
pub mod dxf_import;
pub mod payload;

pub use dxf_export::{
    build_drawing, export_from_segments, export_pattern, export_segments, unique_export_path,
    ExportParams, DEFAULT_LAYER,
};
pub use dxf_import::read_line_entities;
pub use payload::{
    pattern_data, records_from_json, segments_to_records, validate_records, RecordKind,
    SegmentRecord,
};
