//! Error types for manifest cleaning.

use polars::prelude::PolarsError;
use ship_model::StandardField;
use thiserror::Error;

/// Errors raised while cleaning a manifest.
#[derive(Debug, Error)]
pub enum NormalizationError {
    /// The mapping points at a column the manifest does not have.
    #[error("column '{column}' mapped to {field} not found in manifest")]
    ColumnNotFound {
        field: StandardField,
        column: String,
    },

    /// Polars operation failed.
    #[error("DataFrame operation failed: {0}")]
    PolarsError(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, NormalizationError>;
