use std::io::Cursor;
use std::path::Path;

use dxf::entities::EntityType;
use dxf::Drawing;
use tracing::debug;

use crate::error::{ExportError, Result};
use crate::math::Point2;
use crate::operations::merge::LineEntity;

/// Loads every LINE entity of a DXF file, in file order.
///
/// Other entity types are ignored. Z coordinates are dropped.
///
/// # Errors
///
/// Returns `ExportError::ReadFailure` if the file cannot be read, or
/// `ExportError::Dxf` if it does not parse.
pub fn read_line_entities(path: impl AsRef<Path>) -> Result<Vec<LineEntity>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ExportError::ReadFailure {
        path: path.to_path_buf(),
        source,
    })?;
    let drawing = Drawing::load(&mut Cursor::new(bytes)).map_err(ExportError::from)?;
    Ok(line_entities(&drawing))
}

/// Extracts the LINE entities of an in-memory drawing.
#[must_use]
pub fn line_entities(drawing: &Drawing) -> Vec<LineEntity> {
    let mut skipped = 0_usize;
    let lines: Vec<LineEntity> = drawing
        .entities()
        .filter_map(|entity| match &entity.specific {
            EntityType::Line(line) => Some(LineEntity::line(
                entity.common.layer.clone(),
                Point2::new(line.p1.x, line.p1.y),
                Point2::new(line.p2.x, line.p2.y),
            )),
            _ => {
                skipped += 1;
                None
            }
        })
        .collect();
    if skipped > 0 {
        debug!(skipped, "ignored non-line entities");
    }
    lines
}
