//! Error types for mapping operations.

use thiserror::Error;

use crate::field::StandardField;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Name does not identify a standard field.
    #[error("Unknown standard field: {0}")]
    FieldNotFound(String),
    /// Column not found in the manifest.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    /// Column already mapped to another field.
    #[error("Column '{column}' already mapped to '{field}'")]
    ColumnAlreadyUsed { column: String, field: StandardField },
}
