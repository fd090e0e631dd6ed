//! Error types shared across SwingScope crates.

use std::path::PathBuf;

/// Top-level error type for SwingScope operations.
///
/// The first three variants are the "invalid input" class: structurally
/// malformed annotation data that the analysis refuses to guess around.
/// Short or degenerate swing windows are never errors.
#[derive(Debug, thiserror::Error)]
pub enum SwingError {
    #[error(
        "Detection frames out of order at index {index}: {current_secs:.3}s follows {previous_secs:.3}s"
    )]
    UnorderedFrames {
        index: usize,
        previous_secs: f64,
        current_secs: f64,
    },

    #[error("Invalid bounding box at frame {index}: {reason}")]
    InvalidBox { index: usize, reason: String },

    #[error("Invalid time segment at index {index}: start {start_secs:.3}s is after end {end_secs:.3}s")]
    InvalidSegment {
        index: usize,
        start_secs: f64,
        end_secs: f64,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using SwingError.
pub type SwingResult<T> = Result<T, SwingError>;

impl SwingError {
    pub fn invalid_box(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidBox {
            index,
            reason: reason.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error reports malformed upstream input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::UnorderedFrames { .. } | Self::InvalidBox { .. } | Self::InvalidSegment { .. }
        )
    }
}
