//! Shared helpers for the shipment manifest crates.
//!
//! - `frame`: Polars `AnyValue` conversion and column extraction
//! - `format`: currency, percentage and title-case rendering

mod format;
mod frame;

pub use format::{display_name, format_currency, format_grouped, format_percent, title_case};
pub use frame::{
    any_to_f64, any_to_string, any_to_string_non_empty, column_numbers, column_strings, column_text,
    date_from_days, days_from_date, format_numeric, is_numeric_dtype, parse_f64,
};
