//! Error types for mapping configuration.

use thiserror::Error;

/// Errors from importing or exporting a mapping configuration.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("invalid mapping configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MapError>;
