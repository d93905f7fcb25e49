//! Column profiles and the data quality report.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::*;
use serde::Serialize;
use ship_common::{any_to_f64, column_strings, is_numeric_dtype};
use ship_model::ColumnType;

/// Numeric statistics over the non-null values of a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

/// Characteristics of a single manifest column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub column_type: ColumnType,
    pub null_count: usize,
    /// Share of missing values (0.0 to 100.0).
    pub null_percentage: f64,
    pub unique_count: usize,
    /// True if more than 90% of non-null values parse as numbers.
    pub looks_numeric: bool,
    /// Up to three distinct values in first-seen order.
    pub samples: Vec<String>,
    pub numeric: Option<NumericSummary>,
}

/// Manifest-wide quality metrics.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub rows: usize,
    pub columns: usize,
    /// Share of non-null cells (0.0 to 100.0).
    pub completeness: f64,
    pub duplicate_rows: usize,
    pub profiles: Vec<ColumnProfile>,
    /// Values outside 1.5 x IQR, per numeric column.
    pub outliers: BTreeMap<String, usize>,
}

/// Profiles every column of `df` in column order.
pub fn profile_columns(df: &DataFrame) -> Vec<ColumnProfile> {
    df.get_columns().iter().map(profile_column).collect()
}

fn profile_column(col: &Column) -> ColumnProfile {
    let name = col.name().to_string();
    let total = col.len();
    let strings = (0..total)
        .map(|idx| {
            col.get(idx)
                .ok()
                .and_then(ship_common::any_to_string_non_empty)
        })
        .collect::<Vec<_>>();

    let mut unique_values: BTreeSet<&str> = BTreeSet::new();
    let mut samples = Vec::new();
    let mut numeric_count = 0usize;
    for value in strings.iter().flatten() {
        let trimmed = value.trim();
        if unique_values.insert(trimmed) && samples.len() < 3 {
            samples.push(trimmed.to_string());
        }
        if trimmed.parse::<f64>().is_ok() {
            numeric_count += 1;
        }
    }

    let null_count = strings.iter().filter(|value| value.is_none()).count();
    let non_null = total - null_count;
    let null_percentage = if total > 0 {
        null_count as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    let looks_numeric = non_null > 0 && (numeric_count as f64 / non_null as f64) > 0.9;

    let numeric = if is_numeric_dtype(col.dtype()) {
        let values = numeric_values(col);
        summarize(&values)
    } else {
        None
    };

    ColumnProfile {
        name,
        column_type: ColumnType::from_dtype(col.dtype()),
        null_count,
        null_percentage,
        unique_count: unique_values.len(),
        looks_numeric,
        samples,
        numeric,
    }
}

/// Builds the quality report: completeness, duplicates, profiles and IQR outliers.
pub fn build_quality_report(df: &DataFrame) -> QualityReport {
    let profiles = profile_columns(df);
    let total_cells = df.height() * df.width();
    let null_cells: usize = profiles.iter().map(|profile| profile.null_count).sum();
    let completeness = if total_cells > 0 {
        (total_cells - null_cells) as f64 / total_cells as f64 * 100.0
    } else {
        0.0
    };

    let mut outliers = BTreeMap::new();
    for col in df.get_columns() {
        if !is_numeric_dtype(col.dtype()) {
            continue;
        }
        let count = count_iqr_outliers(&numeric_values(col));
        if count > 0 {
            outliers.insert(col.name().to_string(), count);
        }
    }

    QualityReport {
        rows: df.height(),
        columns: df.width(),
        completeness,
        duplicate_rows: count_duplicate_rows(df),
        profiles,
        outliers,
    }
}

/// Counts rows identical to an earlier row.
pub fn count_duplicate_rows(df: &DataFrame) -> usize {
    let columns: Vec<Vec<Option<String>>> = df
        .get_column_names()
        .iter()
        .filter_map(|name| column_strings(df, name))
        .collect();
    let mut seen: BTreeSet<Vec<Option<&str>>> = BTreeSet::new();
    let mut duplicates = 0;
    for row in 0..df.height() {
        let key: Vec<Option<&str>> = columns
            .iter()
            .map(|values| values[row].as_deref())
            .collect();
        if !seen.insert(key) {
            duplicates += 1;
        }
    }
    duplicates
}

/// Counts values below `Q1 - 1.5 IQR` or above `Q3 + 1.5 IQR`.
pub fn count_iqr_outliers(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let (Some(q1), Some(q3)) = (quantile(&sorted, 0.25), quantile(&sorted, 0.75)) else {
        return 0;
    };
    let iqr = q3 - q1;
    let lower = q1 - 1.5 * iqr;
    let upper = q3 + 1.5 * iqr;
    sorted
        .iter()
        .filter(|value| **value < lower || **value > upper)
        .count()
}

fn numeric_values(col: &Column) -> Vec<f64> {
    (0..col.len())
        .filter_map(|idx| col.get(idx).ok().and_then(any_to_f64))
        .collect()
}

fn summarize(values: &[f64]) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let sum: f64 = sorted.iter().sum();
    Some(NumericSummary {
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean: sum / sorted.len() as f64,
        median: quantile(&sorted, 0.5)?,
    })
}

/// Linear-interpolated quantile over sorted values.
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = (sorted.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        DataFrame::new(vec![
            Series::new("carrier".into(), vec![Some("UPS"), Some("UPS"), None, Some("DHL")])
                .into_column(),
            Series::new("cost".into(), vec![Some(10.0), Some(10.0), Some(12.0), None])
                .into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn test_profile_counts_nulls_and_samples() {
        let profiles = profile_columns(&sample_df());
        let carrier = &profiles[0];
        assert_eq!(carrier.column_type, ColumnType::Text);
        assert_eq!(carrier.null_count, 1);
        assert_eq!(carrier.unique_count, 2);
        assert_eq!(carrier.samples, vec!["UPS", "DHL"]);
        assert!((carrier.null_percentage - 25.0).abs() < 1e-9);
        assert!(!carrier.looks_numeric);
    }

    #[test]
    fn test_profile_numeric_summary() {
        let profiles = profile_columns(&sample_df());
        let cost = &profiles[1];
        assert!(cost.looks_numeric);
        let summary = cost.numeric.as_ref().unwrap();
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 12.0);
        assert_eq!(summary.median, 10.0);
    }

    #[test]
    fn test_quality_report() {
        let report = build_quality_report(&sample_df());
        assert_eq!(report.rows, 4);
        assert_eq!(report.columns, 2);
        assert_eq!(report.duplicate_rows, 1);
        assert!((report.completeness - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_iqr_outliers() {
        let values = [10.0, 11.0, 12.0, 13.0, 12.0, 11.0, 100.0];
        assert_eq!(count_iqr_outliers(&values), 1);
        assert_eq!(count_iqr_outliers(&[]), 0);
    }
}
