//! Harness error type.

use std::path::PathBuf;

use ltd_fmt_core::FormatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid argument {input:?}: {reason}")]
    Argument { input: String, reason: String },

    #[error("no fixture JSON files found in {}", .0.display())]
    NoFixtures(PathBuf),

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl HarnessError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
