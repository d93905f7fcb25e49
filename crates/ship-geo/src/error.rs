//! Error types for geocoding and route analytics.

use polars::prelude::PolarsError;
use ship_model::StandardField;
use thiserror::Error;

/// Errors raised by geographic enrichment and analytics.
#[derive(Debug, Error)]
pub enum GeoError {
    /// A field the analysis needs is not mapped to a column.
    #[error("{} column is not mapped", .0.display_name())]
    FieldNotMapped(StandardField),

    /// A mapped or derived column is missing from the manifest.
    #[error("column '{0}' not found in manifest")]
    ColumnNotFound(String),

    /// The geocoding endpoint is not a valid URL.
    #[error("invalid geocoding endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The geocoding request failed.
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The geocoding service answered with a non-success status.
    #[error("geocoding service returned status {0}")]
    Status(u16),

    /// A coordinate in the response could not be parsed.
    #[error("invalid coordinate '{0}' in geocoding response")]
    InvalidCoordinate(String),

    /// Polars operation failed.
    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, GeoError>;
