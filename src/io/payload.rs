//! `{type, points}` segment records exchanged with the 3D viewer and the
//! custom-export endpoint.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PayloadError, Result};
use crate::geometry::{Segment, SegmentKind};
use crate::math::Point2;
use crate::operations::creation::{generate_segments, PatternParams};

/// The `type` discriminator of a record.
///
/// Unknown names are kept verbatim so they can be reported back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "line")]
    Line,
    #[serde(rename = "bezier")]
    Bezier,
    #[serde(untagged)]
    Other(String),
}

impl RecordKind {
    /// The segment kind this record declares, if supported.
    #[must_use]
    pub fn segment_kind(&self) -> Option<SegmentKind> {
        match self {
            Self::Line => Some(SegmentKind::Line),
            Self::Bezier => Some(SegmentKind::Bezier),
            Self::Other(_) => None,
        }
    }

    /// Name as it appears on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Line => SegmentKind::Line.as_str(),
            Self::Bezier => SegmentKind::Bezier.as_str(),
            Self::Other(name) => name,
        }
    }
}

impl From<SegmentKind> for RecordKind {
    fn from(kind: SegmentKind) -> Self {
        match kind {
            SegmentKind::Line => Self::Line,
            SegmentKind::Bezier => Self::Bezier,
        }
    }
}

/// Wire form of one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// `[x, y]` pairs. Records without points are skipped on export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<[f64; 2]>>,
    /// Free-form annotation shown by the viewer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SegmentRecord {
    /// Converts the record into a typed segment.
    ///
    /// Returns `Ok(None)` when the record carries no point data.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::UnsupportedSegmentType` for an unknown `type`,
    /// or `PayloadError::InvalidSegmentPayload` when the point count does not
    /// match the type or a coordinate is not finite.
    pub fn to_segment(&self, index: usize) -> Result<Option<Segment>> {
        let points = match self.points.as_deref() {
            None | Some([]) => return Ok(None),
            Some(points) => points,
        };

        let kind = self
            .kind
            .segment_kind()
            .ok_or_else(|| PayloadError::UnsupportedSegmentType {
                index,
                kind: self.kind.as_str().to_owned(),
            })?;

        if points.len() != kind.point_count() {
            return Err(PayloadError::InvalidSegmentPayload {
                index: Some(index),
                reason: format!(
                    "expected {} points for {}, got {}",
                    kind.point_count(),
                    kind.as_str(),
                    points.len()
                ),
            }
            .into());
        }

        if let Some(bad) = points.iter().position(|[x, y]| !x.is_finite() || !y.is_finite()) {
            return Err(PayloadError::InvalidSegmentPayload {
                index: Some(index),
                reason: format!("point {bad} has a non-finite coordinate"),
            }
            .into());
        }

        let p: Vec<Point2> = points.iter().map(|&[x, y]| Point2::new(x, y)).collect();
        let segment = match kind {
            SegmentKind::Line => Segment::line(p[0], p[1]),
            SegmentKind::Bezier => Segment::bezier(p[0], p[1], p[2], p[3]),
        };
        Ok(Some(segment))
    }
}

impl From<&Segment> for SegmentRecord {
    fn from(segment: &Segment) -> Self {
        Self {
            kind: segment.kind().into(),
            points: Some(segment.points().iter().map(|p| [p.x, p.y]).collect()),
            label: None,
        }
    }
}

/// Converts typed segments into their wire records.
#[must_use]
pub fn segments_to_records(segments: &[Segment]) -> Vec<SegmentRecord> {
    segments.iter().map(SegmentRecord::from).collect()
}

/// Returns the viewer payload for the shirt generated from `params`.
#[must_use]
pub fn pattern_data(params: &PatternParams) -> Vec<SegmentRecord> {
    segments_to_records(&generate_segments(params))
}

/// Parses a JSON array of segment records.
///
/// # Errors
///
/// Returns `PayloadError::InvalidSegmentPayload` if the text is not a valid
/// record array.
pub fn records_from_json(json: &str) -> Result<Vec<SegmentRecord>> {
    serde_json::from_str(json).map_err(|e| {
        PayloadError::InvalidSegmentPayload {
            index: None,
            reason: e.to_string(),
        }
        .into()
    })
}

/// Validates a client payload into typed segments.
///
/// Records without point data are skipped. All validation happens here,
/// before anything is written.
///
/// # Errors
///
/// Returns `PayloadError::InvalidSegmentPayload` if the payload is empty or
/// nothing remains after skipping, and propagates per-record errors from
/// [`SegmentRecord::to_segment`].
pub fn validate_records(records: &[SegmentRecord]) -> Result<Vec<Segment>> {
    if records.is_empty() {
        return Err(PayloadError::InvalidSegmentPayload {
            index: None,
            reason: "no segment data".to_owned(),
        }
        .into());
    }

    let mut segments = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match record.to_segment(index)? {
            Some(segment) => segments.push(segment),
            None => debug!(index, kind = record.kind.as_str(), "skipping segment without points"),
        }
    }

    if segments.is_empty() {
        return Err(PayloadError::InvalidSegmentPayload {
            index: None,
            reason: "no segment carries point data".to_owned(),
        }
        .into());
    }
    Ok(segments)
}
