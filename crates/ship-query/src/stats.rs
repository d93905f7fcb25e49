//! Aggregates over manifest columns.

use std::collections::HashMap;

/// A value and the number of rows holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Counts distinct values, most frequent first.
///
/// Nulls and blank strings are not counted; cleaned columns hold no blanks, so
/// this only differs from a plain count on raw text. Ties keep the order in
/// which the values first appear.
pub fn value_counts(values: &[Option<String>]) -> Vec<ValueCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();
    for value in values.iter().flatten() {
        if value.trim().is_empty() {
            continue;
        }
        match index.get(value.as_str()) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                index.insert(value.as_str(), counts.len());
                counts.push(ValueCount {
                    value: value.clone(),
                    count: 1,
                });
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Share of `count` in `total`, as a percentage. Zero when `total` is zero.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Renders `- value: count (pct%)` lines, percentages over `total` rows.
pub fn breakdown_lines(counts: &[ValueCount], total: usize) -> Vec<String> {
    counts
        .iter()
        .map(|entry| {
            format!(
                "- {}: {} ({:.1}%)",
                entry.value,
                entry.count,
                percentage(entry.count, total)
            )
        })
        .collect()
}

/// Sum, mean and range of the non-null values in a numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericStats {
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Number of non-null values.
    pub count: usize,
}

impl NumericStats {
    /// Computes statistics, or `None` if every value is null or non-finite.
    pub fn from_values(values: &[Option<f64>]) -> Option<Self> {
        let present: Vec<f64> = values
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        if present.is_empty() {
            return None;
        }
        let sum: f64 = present.iter().sum();
        let min = present.iter().copied().fold(f64::INFINITY, f64::min);
        let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            sum,
            mean: sum / present.len() as f64,
            min,
            max,
            count: present.len(),
        })
    }
}

/// True when `value` contains `needle`, ignoring case.
pub(crate) fn contains_ignore_case(value: &str, needle: &str) -> bool {
    value.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_value_counts_orders_by_count_then_first_seen() {
        let values = strings(&[
            Some("UPS"),
            Some("FedEx"),
            None,
            Some("FedEx"),
            Some("DHL"),
            Some(" "),
        ]);
        let counts = value_counts(&values);
        let rendered: Vec<(&str, usize)> = counts
            .iter()
            .map(|c| (c.value.as_str(), c.count))
            .collect();
        assert_eq!(rendered, vec![("FedEx", 2), ("UPS", 1), ("DHL", 1)]);
    }

    #[test]
    fn test_breakdown_uses_total_rows() {
        let counts = vec![ValueCount {
            value: "Delayed".to_string(),
            count: 2,
        }];
        assert_eq!(breakdown_lines(&counts, 4), vec!["- Delayed: 2 (50.0%)"]);
    }

    #[test]
    fn test_percentage_of_empty_total() {
        assert_eq!(percentage(3, 0), 0.0);
    }

    #[test]
    fn test_numeric_stats_skip_nulls() {
        let stats = NumericStats::from_values(&[Some(25.5), Some(45.2), None]).unwrap();
        assert!((stats.sum - 70.7).abs() < 1e-9);
        assert!((stats.mean - 35.35).abs() < 1e-9);
        assert_eq!(stats.min, 25.5);
        assert_eq!(stats.max, 45.2);
        assert_eq!(stats.count, 2);
        assert!(NumericStats::from_values(&[None, None]).is_none());
    }

    #[test]
    fn test_numeric_stats_skip_non_finite() {
        let stats =
            NumericStats::from_values(&[Some(25.5), Some(f64::NAN), Some(45.2)]).unwrap();
        assert!((stats.sum - 70.7).abs() < 1e-9);
        assert!((stats.mean - 35.35).abs() < 1e-9);
        assert_eq!(stats.count, 2);
        assert!(NumericStats::from_values(&[Some(f64::INFINITY)]).is_none());
    }
}
