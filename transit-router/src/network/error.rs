//! Network loading error types.

use std::path::PathBuf;

use crate::domain::ValidationError;

/// Errors that can occur when loading a network description.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading the file failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not a valid network description
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The description parsed but is not a valid network
    #[error("invalid network: {0}")]
    Validation(#[from] ValidationError),
}
