use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for pattern generation, export and merging.
#[derive(Debug, Error)]
pub enum SeamlineError {
    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

impl SeamlineError {
    /// Returns `true` when the error was caused by caller-supplied data
    /// rather than by a failure on our side.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Payload(_) | Self::Merge(_))
    }
}

/// Errors raised while validating client-supplied segment data.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid segment payload{}: {reason}", at_index(.index))]
    InvalidSegmentPayload {
        index: Option<usize>,
        reason: String,
    },

    #[error("unsupported segment type {kind:?} at index {index}")]
    UnsupportedSegmentType { index: usize, kind: String },
}

/// Errors related to layer merging.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("no line entities on layer {layer:?}")]
    EmptyLayerSelection { layer: String },
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Errors related to reading and writing drawings.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dxf error: {0}")]
    Dxf(#[from] dxf::DxfError),
}

#[allow(clippy::ref_option)]
fn at_index(index: &Option<usize>) -> String {
    index.map(|i| format!(" at index {i}")).unwrap_or_default()
}

/// Convenience type alias for results using [`SeamlineError`].
pub type Result<T> = std::result::Result<T, SeamlineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_errors_are_client_errors() {
        let err: SeamlineError = PayloadError::InvalidSegmentPayload {
            index: None,
            reason: "empty".to_owned(),
        }
        .into();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "invalid segment payload: empty");
    }

    #[test]
    fn invalid_payload_message_names_index() {
        let err = PayloadError::InvalidSegmentPayload {
            index: Some(3),
            reason: "expected 2 points for line, got 3".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "invalid segment payload at index 3: expected 2 points for line, got 3"
        );
    }

    #[test]
    fn write_failures_are_server_errors() {
        let err: SeamlineError = ExportError::WriteFailure {
            path: PathBuf::from("/nope/pattern.dxf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(!err.is_client_error());
    }

    #[test]
    fn tessellation_errors_are_server_errors() {
        let err: SeamlineError =
            TessellationError::InvalidParameters("steps must be at least 2".to_owned()).into();
        assert!(!err.is_client_error());
        assert_eq!(
            err.to_string(),
            "invalid tessellation parameters: steps must be at least 2"
        );
    }
}
