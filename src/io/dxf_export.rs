use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use dxf::entities::{Entity, EntityType, Line};
use dxf::Drawing;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::info;
use uuid::Uuid;

use crate::error::{ExportError, Result, TessellationError};
use crate::geometry::{Segment, SegmentKind};
use crate::math::Point2;
use crate::operations::creation::{generate_segments, PatternParams};
use crate::tessellation::{flatten_segment, FlattenParams};

use super::payload::{validate_records, SegmentRecord};

/// Layer every exported entity is placed on unless configured otherwise.
pub const DEFAULT_LAYER: &str = "0";

/// Parameters controlling drawing export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportParams {
    /// Layer name assigned to every LINE entity.
    pub layer: String,
    /// Bezier flattening quality.
    pub flatten: FlattenParams,
}

impl Default for ExportParams {
    fn default() -> Self {
        Self {
            layer: DEFAULT_LAYER.to_owned(),
            flatten: FlattenParams::default(),
        }
    }
}

/// Builds an in-memory drawing with one LINE entity per straight piece.
///
/// Lines become a single entity; Beziers are flattened and contribute one
/// entity per pair of consecutive samples.
#[must_use]
pub fn build_drawing(segments: &[Segment], params: &ExportParams) -> Drawing {
    let mut drawing = Drawing::new();
    for segment in segments {
        let points = flatten_segment(segment, params.flatten);
        for pair in points.windows(2) {
            drawing.add_entity(line_entity(pair[0], pair[1], &params.layer));
        }
    }
    drawing
}

fn line_entity(a: Point2, b: Point2, layer: &str) -> Entity {
    let line = Line::new(
        dxf::Point::new(a.x, a.y, 0.0),
        dxf::Point::new(b.x, b.y, 0.0),
    );
    let mut entity = Entity::new(EntityType::Line(line));
    entity.common.layer = layer.to_owned();
    entity
}

/// Writes `segments` to a DXF file at `path` and returns its absolute path.
///
/// The drawing is fully serialized before the destination is touched and is
/// moved into place atomically, so a failure never leaves a partial file.
///
/// # Errors
///
/// Returns `TessellationError::InvalidParameters` if a Bezier is present and
/// fewer than 2 flattening steps are configured, `ExportError::Dxf` if
/// serialization fails, or `ExportError::WriteFailure` if the path cannot be
/// resolved, a parent directory cannot be created, or the file cannot be
/// written.
pub fn export_segments(
    segments: &[Segment],
    path: impl AsRef<Path>,
    params: &ExportParams,
) -> Result<PathBuf> {
    let steps = params.flatten.steps;
    if steps < 2 && segments.iter().any(|s| s.kind() == SegmentKind::Bezier) {
        return Err(TessellationError::InvalidParameters(format!(
            "at least 2 flattening steps are required for bezier export, got {steps}"
        ))
        .into());
    }

    let drawing = build_drawing(segments, params);
    let mut buffer = Vec::new();
    drawing.save(&mut buffer).map_err(ExportError::from)?;

    let path = path.as_ref();
    let out = std::path::absolute(path).map_err(|source| ExportError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomically(&out, &buffer)?;

    info!(
        path = %out.display(),
        entities = drawing.entities().count(),
        "wrote drawing"
    );
    Ok(out)
}

/// Generates the shirt outline for `params` and exports it.
///
/// # Errors
///
/// See [`export_segments`].
pub fn export_pattern(
    params: &PatternParams,
    path: impl AsRef<Path>,
    export: &ExportParams,
) -> Result<PathBuf> {
    export_segments(&generate_segments(params), path, export)
}

/// Validates a client payload and exports it.
///
/// Nothing is written unless the whole payload validates.
///
/// # Errors
///
/// Returns a `PayloadError` for an empty or malformed payload, see
/// [`validate_records`]; otherwise see [`export_segments`].
pub fn export_from_segments(
    records: &[SegmentRecord],
    path: impl AsRef<Path>,
    export: &ExportParams,
) -> Result<PathBuf> {
    let segments = validate_records(records)?;
    export_segments(&segments, path, export)
}

/// Returns `dir/<stem>_<uuid>.dxf`, a collision-free destination for
/// concurrent exports.
#[must_use]
pub fn unique_export_path(dir: impl AsRef<Path>, stem: &str) -> PathBuf {
    dir.as_ref()
        .join(format!("{stem}_{}.dxf", Uuid::new_v4().simple()))
}

fn write_atomically(out: &Path, bytes: &[u8]) -> Result<()> {
    let write_failure = |source| ExportError::WriteFailure {
        path: out.to_path_buf(),
        source,
    };

    let dir = out.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(write_failure)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_failure)?;
    tmp.write_all(bytes).map_err(write_failure)?;
    tmp.as_file().sync_all().map_err(write_failure)?;
    tmp.persist(out).map_err(|e| write_failure(e.error))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{PayloadError, SeamlineError};
    use crate::io::dxf_import::read_line_entities;
    use crate::io::payload::RecordKind;

    fn line_count(drawing: &Drawing) -> usize {
        drawing
            .entities()
            .filter(|e| matches!(e.specific, EntityType::Line(_)))
            .count()
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn default_pattern_has_sixty_lines() {
        let segs = generate_segments(&PatternParams::default());
        let drawing = build_drawing(&segs, &ExportParams::default());
        assert_eq!(line_count(&drawing), 3 + 3 * 19);
    }

    #[test]
    fn flatten_steps_control_entity_count() {
        let segs = generate_segments(&PatternParams::default());
        let params = ExportParams {
            flatten: FlattenParams { steps: 5 },
            ..ExportParams::default()
        };
        assert_eq!(line_count(&build_drawing(&segs, &params)), 3 + 3 * 4);
    }

    #[test]
    fn export_pattern_writes_absolute_existing_path() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let out = export_pattern(
            &PatternParams::new(100.0, 90.0, 70.0, 40.0),
            dir.path().join("nested/deeper/pattern.dxf"),
            &ExportParams::default(),
        )
        .unwrap();
        assert!(out.is_absolute());
        assert!(out.exists());

        let entities = read_line_entities(&out).unwrap();
        assert_eq!(entities.len(), 60);
        assert!(entities.iter().all(|e| e.layer == DEFAULT_LAYER));
    }

    #[test]
    fn single_line_payload_exports_one_entity() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![SegmentRecord {
            kind: RecordKind::Line,
            points: Some(vec![[0.0, 0.0], [10.0, 0.0]]),
            label: None,
        }];
        let out =
            export_from_segments(&records, dir.path().join("custom.dxf"), &ExportParams::default())
                .unwrap();

        let entities = read_line_entities(&out).unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].start, Point2::new(0.0, 0.0));
        assert_eq!(entities[0].end, Point2::new(10.0, 0.0));
    }

    #[test]
    fn empty_payload_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.dxf");
        let err = export_from_segments(&[], &path, &ExportParams::default()).unwrap_err();
        assert!(matches!(
            err,
            SeamlineError::Payload(PayloadError::InvalidSegmentPayload { .. })
        ));
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn invalid_record_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.dxf");
        let records = vec![
            SegmentRecord {
                kind: RecordKind::Line,
                points: Some(vec![[0.0, 0.0], [10.0, 0.0]]),
                label: None,
            },
            SegmentRecord {
                kind: RecordKind::Other("spline".to_owned()),
                points: Some(vec![[0.0, 0.0], [10.0, 0.0]]),
                label: None,
            },
        ];
        let err = export_from_segments(&records, &path, &ExportParams::default()).unwrap_err();
        assert!(err.is_client_error());
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_destination_is_a_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = export_pattern(
            &PatternParams::default(),
            blocker.join("pattern.dxf"),
            &ExportParams::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SeamlineError::Export(ExportError::WriteFailure { .. })
        ));
        assert!(!err.is_client_error());
    }

    #[test]
    fn too_few_steps_reject_curves_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/pattern.dxf");
        for steps in [0, 1] {
            let params = ExportParams {
                flatten: FlattenParams { steps },
                ..ExportParams::default()
            };
            let err = export_pattern(&PatternParams::default(), &path, &params).unwrap_err();
            assert!(matches!(
                err,
                SeamlineError::Tessellation(TessellationError::InvalidParameters(_))
            ));
        }
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn too_few_steps_allowed_for_lines_only() {
        let dir = tempfile::tempdir().unwrap();
        let segs = vec![Segment::line(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))];
        let params = ExportParams {
            flatten: FlattenParams { steps: 1 },
            ..ExportParams::default()
        };
        let out = export_segments(&segs, dir.path().join("lines.dxf"), &params).unwrap();
        assert_eq!(read_line_entities(&out).unwrap().len(), 1);
    }

    #[test]
    fn custom_layer_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let params = ExportParams {
            layer: "OUTLINE".to_owned(),
            ..ExportParams::default()
        };
        let out = export_pattern(&PatternParams::default(), dir.path().join("p.dxf"), &params)
            .unwrap();
        let entities = read_line_entities(&out).unwrap();
        assert!(entities.iter().all(|e| e.layer == "OUTLINE"));
    }

    #[test]
    fn unique_paths_differ() {
        let a = unique_export_path("/tmp", "custom_pattern");
        let b = unique_export_path("/tmp", "custom_pattern");
        assert_ne!(a, b);
        assert_eq!(a.extension().unwrap(), "dxf");
    }
}
