//! Manifest file reading for CSV and XLSX inputs.

use std::path::Path;

use calamine::{Data, DataType as _, Reader, open_workbook_auto};
use chrono::NaiveTime;
use polars::prelude::*;
use ship_common::{format_numeric, parse_f64};
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};
use crate::headers::{normalize_column_names, unique_headers};

/// Default maximum manifest size (10 MB).
pub const MAX_MANIFEST_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Options controlling how a manifest is loaded.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Files larger than this are rejected before parsing.
    pub max_file_size: u64,
    /// Lowercase headers and replace spaces and hyphens with underscores.
    pub normalize_headers: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_MANIFEST_FILE_SIZE,
            normalize_headers: true,
        }
    }
}

impl LoadOptions {
    /// Build options from a size limit in megabytes.
    #[must_use]
    pub fn with_max_file_size_mb(mut self, megabytes: u64) -> Self {
        self.max_file_size = megabytes.saturating_mul(1024 * 1024);
        self
    }

    #[must_use]
    pub fn with_normalize_headers(mut self, enable: bool) -> Self {
        self.normalize_headers = enable;
        self
    }
}

/// Supported manifest formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Csv,
    Spreadsheet,
}

impl ManifestFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(Self::Spreadsheet),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Load a manifest file into a DataFrame.
///
/// Checks the size limit, dispatches on the extension, validates the shape
/// and optionally normalizes header names.
pub fn load_manifest(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    check_file_size_with_limit(path, options.max_file_size)?;
    let format = ManifestFormat::from_path(path)?;

    let mut df = match format {
        ManifestFormat::Csv => read_csv_manifest(path)?,
        ManifestFormat::Spreadsheet => read_spreadsheet_manifest(path)?,
    };
    validate_manifest_shape(&df, path)?;

    if options.normalize_headers {
        normalize_column_names(&mut df)?;
    }

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "Loaded manifest"
    );
    Ok(df)
}

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Validate DataFrame shape after loading.
///
/// Rejects manifests with no rows or with blank column names.
pub fn validate_manifest_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(IngestError::EmptyManifest {
            path: path.to_path_buf(),
        });
    }

    if df.width() > 500 {
        warn!(
            path = %path.display(),
            columns = df.width(),
            "Manifest has more than 500 columns - may impact performance"
        );
    }

    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
            });
        }
    }

    Ok(())
}

/// Reads a CSV file with a single header row.
///
/// Every column is read as text. Numeric and date conversion happens during
/// cleaning, where an unparseable cell becomes null instead of failing the load.
pub fn read_csv_manifest(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Reads the first worksheet of a workbook.
///
/// The first row is the header. A column becomes `Float64` when every
/// non-empty cell is numeric, otherwise it is kept as text.
pub fn read_spreadsheet_manifest(path: &Path) -> Result<DataFrame> {
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?;
    debug!(path = %path.display(), sheet = %sheet, "Reading worksheet");

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| workbook_error(e.to_string()))?;
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(IngestError::EmptyManifest {
            path: path.to_path_buf(),
        });
    };

    let raw_headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| cell_text(cell).unwrap_or_else(|| format!("column_{}", idx + 1)))
        .collect();
    let headers = unique_headers(&raw_headers);

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for row in rows {
        if row.iter().all(|cell| cell_text(cell).is_none()) {
            continue;
        }
        for (idx, values) in cells.iter_mut().enumerate() {
            values.push(row.get(idx).and_then(cell_text));
        }
    }

    let columns = headers
        .iter()
        .zip(cells)
        .map(|(name, values)| infer_column(name, values))
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// Build a column, preferring `Float64` when every value parses as a number.
fn infer_column(name: &str, values: Vec<Option<String>>) -> Column {
    let numbers: Option<Vec<Option<f64>>> = values
        .iter()
        .map(|value| match value {
            Some(text) => parse_f64(text).map(Some),
            None => Some(None),
        })
        .collect();
    let has_values = values.iter().any(Option::is_some);
    match numbers {
        Some(numbers) if has_values => Series::new(name.into(), numbers).into_column(),
        _ => Series::new(name.into(), values).into_column(),
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(text) => {
            if text.trim().is_empty() {
                None
            } else {
                Some(text.clone())
            }
        }
        Data::Float(value) => Some(format_numeric(*value)),
        Data::Int(value) => Some(value.to_string()),
        Data::DateTime(_) => cell.as_datetime().map(|value| {
            if value.time() == NaiveTime::MIN {
                value.format("%Y-%m-%d").to_string()
            } else {
                value.format("%Y-%m-%d %H:%M:%S").to_string()
            }
        }),
        other => Some(other.to_string()),
    }
}
