//! Data cleaner for shipment manifests.
//!
//! Applies per-field normalization to the columns named by a
//! [`ColumnMapping`](ship_model::ColumnMapping): title-cased names,
//! lowercased statuses, numeric amounts and calendar dates. Values that
//! cannot be parsed become null instead of raising errors.
//!
//! # Example
//!
//! ```ignore
//! use ship_normalization::clean;
//!
//! let mapping = ship_map::resolve(&columns);
//! let cleaned = clean(&manifest, &mapping)?;
//! ```

mod cleaner;
mod error;
mod values;

pub use cleaner::clean;
pub use error::{NormalizationError, Result};
pub use values::{clean_status, clean_title, parse_amount, parse_date};
