//! Shipment manifest ingestion.
//!
//! This crate loads uploaded manifests (CSV or XLSX with a header row) into
//! Polars DataFrames and describes their columns.
//!
//! # Features
//!
//! - **Loading**: size limit check, format detection, shape validation
//! - **Header normalization**: `Shipment ID` becomes `shipment_id`
//! - **Profiles**: null ratios, cardinality, samples, numeric summaries
//! - **Quality report**: completeness, duplicate rows, IQR outliers
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ship_ingest::{LoadOptions, build_quality_report, load_manifest};
//!
//! let df = load_manifest(Path::new("manifest.csv"), &LoadOptions::default())?;
//! let report = build_quality_report(&df);
//! ```

mod error;
mod headers;
mod profile;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loading ===
pub use reader::{
    LoadOptions, MAX_MANIFEST_FILE_SIZE, ManifestFormat, check_file_size_with_limit,
    load_manifest, read_csv_manifest, read_spreadsheet_manifest, validate_manifest_shape,
};

// === Headers ===
pub use headers::{normalize_column_names, normalize_header};

// === Profiles ===
pub use profile::{
    ColumnProfile, NumericSummary, QualityReport, build_quality_report, count_duplicate_rows,
    count_iqr_outliers, profile_columns,
};
