//! Compliance error types.

use std::path::PathBuf;

use ship_model::StandardField;
use thiserror::Error;

/// Errors from the approved-carrier store and alert generation.
#[derive(Debug, Error)]
pub enum ComplianceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temp file could not be renamed over the target.
    #[error("Failed to complete save of {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The carrier list could not be serialized.
    #[error("Failed to serialize carrier list")]
    Serialization(#[from] serde_json::Error),

    /// A field the check needs is not mapped to a column.
    #[error("{} column is not mapped", .0.display_name())]
    FieldNotMapped(StandardField),
}

pub type Result<T> = std::result::Result<T, ComplianceError>;
