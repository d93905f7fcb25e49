//! Headline shipment counts.

use polars::prelude::DataFrame;
use ship_common::column_strings;
use ship_model::{ColumnMapping, StandardField};

/// Shipment totals by coarse status.
///
/// Status counts are zero when the status field is not mapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyMetrics {
    pub total: usize,
    /// Status contains "delay".
    pub delayed: usize,
    /// Status contains "in transit".
    pub in_transit: usize,
    /// Status contains "delivered" or "completed".
    pub completed: usize,
}

impl KeyMetrics {
    pub fn compute(df: &DataFrame, mapping: &ColumnMapping) -> Self {
        let mut metrics = Self {
            total: df.height(),
            ..Self::default()
        };
        let Some(statuses) = mapping
            .get(StandardField::Status)
            .and_then(|column| column_strings(df, column))
        else {
            return metrics;
        };
        for status in statuses.iter().flatten() {
            let status = status.to_lowercase();
            if status.contains("delay") {
                metrics.delayed += 1;
            }
            if status.contains("in transit") {
                metrics.in_transit += 1;
            }
            if status.contains("delivered") || status.contains("completed") {
                metrics.completed += 1;
            }
        }
        metrics
    }
}
