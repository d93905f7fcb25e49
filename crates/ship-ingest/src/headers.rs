//! Header name normalization.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::Result;

/// Normalizes a header: trims, lowercases and turns spaces and hyphens into underscores.
///
/// # Examples
///
/// ```
/// use ship_ingest::normalize_header;
///
/// assert_eq!(normalize_header(" Shipment ID "), "shipment_id");
/// assert_eq!(normalize_header("Pick-up Date"), "pick_up_date");
/// ```
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Renames every column of `df` with [`normalize_header`].
///
/// Names that collide after normalization get a numeric suffix.
pub fn normalize_column_names(df: &mut DataFrame) -> Result<()> {
    let normalized: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| normalize_header(name))
        .collect();
    let names = unique_headers(&normalized);
    debug!(columns = ?names, "Normalized column names");
    df.set_column_names(names)?;
    Ok(())
}

/// Makes header names unique by suffixing repeats with `_2`, `_3`, ...
pub(crate) fn unique_headers(raw: &[String]) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    raw.iter()
        .map(|name| {
            let mut candidate = name.clone();
            let mut suffix = 2;
            while seen.contains(&candidate) {
                candidate = format!("{name}_{suffix}");
                suffix += 1;
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_normalize_header_collapses_whitespace() {
        assert_eq!(normalize_header("Total   Cost"), "total_cost");
        assert_eq!(normalize_header("carrier_name"), "carrier_name");
    }

    #[test]
    fn test_unique_headers_suffixes_repeats() {
        let raw = vec!["cost".to_string(), "cost".to_string(), "cost".to_string()];
        assert_eq!(unique_headers(&raw), vec!["cost", "cost_2", "cost_3"]);
    }

    #[test]
    fn test_normalize_column_names_handles_collisions() {
        let mut df = DataFrame::new(vec![
            Series::new("Cost".into(), vec![1.0]).into_column(),
            Series::new("cost".into(), vec![2.0]).into_column(),
        ])
        .unwrap();
        normalize_column_names(&mut df).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["cost", "cost_2"]);
    }
}
