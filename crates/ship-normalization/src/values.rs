//! Single-value cleaning functions.
//!
//! All functions are pure and return `None` for values that should become null.

use chrono::{NaiveDate, NaiveDateTime};
use ship_common::{parse_f64, title_case};

/// Currency symbols accepted in front of amounts.
const CURRENCY_SYMBOLS: &[char] = &['$', '£', '€'];

/// Date-only formats, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Date-time formats whose date part is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Trims and title-cases a name; blank becomes `None`.
///
/// # Examples
///
/// ```
/// use ship_normalization::clean_title;
///
/// assert_eq!(clean_title("  new york "), Some("New York".to_string()));
/// assert_eq!(clean_title("   "), None);
/// ```
pub fn clean_title(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(title_case(trimmed))
    }
}

/// Trims and lowercases a status; blank becomes `None`.
pub fn clean_status(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Parses an amount such as `$1,234.50` or `-€12`.
///
/// # Examples
///
/// ```
/// use ship_normalization::parse_amount;
///
/// assert_eq!(parse_amount("$1,234.50"), Some(1234.5));
/// assert_eq!(parse_amount("12 kg"), None);
/// ```
pub fn parse_amount(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let digits = rest
        .trim_start_matches(CURRENCY_SYMBOLS)
        .trim_start()
        .replace(',', "");
    let parsed = parse_f64(&digits)?;
    Some(if negative { -parsed } else { parsed })
}

/// Parses a calendar date in any of the supported formats.
///
/// `MM/DD/YYYY` is preferred over `DD/MM/YYYY`; the latter is used when the
/// first component cannot be a month.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ship_normalization::parse_date;
///
/// assert_eq!(parse_date("2024-03-05"), NaiveDate::from_ymd_opt(2024, 3, 5));
/// assert_eq!(parse_date("03/05/2024"), NaiveDate::from_ymd_opt(2024, 3, 5));
/// assert_eq!(parse_date("25/12/2024"), NaiveDate::from_ymd_opt(2024, 12, 25));
/// assert_eq!(parse_date("soon"), None);
/// ```
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|datetime| datetime.date())
        })
}
