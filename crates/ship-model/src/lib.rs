//! Shipment manifest data model.
//!
//! A manifest is a Polars `DataFrame` with arbitrary column names. This crate
//! describes the fixed set of logistics attributes the tools understand and
//! how they are tied to actual columns:
//!
//! - [`StandardField`]: the canonical attributes, in resolution order
//! - [`FieldKind`]: how values of a field are cleaned (text, number, date)
//! - [`ColumnType`]: the explicit type a manifest column carries
//! - [`ColumnMapping`]: standard field to actual column association
//!
//! # Example
//!
//! ```
//! use ship_model::{ColumnMapping, StandardField};
//!
//! let columns = vec!["Carrier".to_string(), "Origin".to_string()];
//! let mut mapping = ColumnMapping::new();
//! mapping.assign(StandardField::Carrier, "Carrier", &columns).unwrap();
//!
//! assert_eq!(mapping.get(StandardField::Carrier), Some("Carrier"));
//! assert!(mapping.assign(StandardField::Origin, "Carrier", &columns).is_err());
//! ```

mod column;
mod error;
mod field;
mod mapping;

pub use column::ColumnType;
pub use error::MappingError;
pub use field::{DEFAULT_REQUIRED_FIELDS, FieldKind, StandardField};
pub use mapping::ColumnMapping;
