//! Direct statistical answers.
//!
//! Questions are routed through [`crate::intent::DISPATCH`]; the selected
//! handler computes an exact aggregate from the manifest. A handler whose
//! column is not mapped answers with a diagnostic listing the available
//! columns instead of failing.

use chrono::{Local, NaiveDate};
use polars::prelude::*;
use ship_common::{column_numbers, column_strings, format_currency, format_grouped};
use ship_model::{ColumnMapping, StandardField};
use tracing::debug;

use crate::intent::{Intent, mentions_delayed_or_pending, route};
use crate::stats::{NumericStats, breakdown_lines, contains_ignore_case, value_counts};

/// Answers questions directly from the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryEngine {
    today: NaiveDate,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryEngine {
    /// Creates an engine that treats the local calendar date as today.
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Creates an engine with a fixed notion of today.
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Answers `question` from `df`, or returns `None` when no intent matches
    /// and the question should go to the language model.
    pub fn answer_direct(
        &self,
        df: &DataFrame,
        mapping: &ColumnMapping,
        question: &str,
    ) -> Option<String> {
        let intent = route(question)?;
        debug!(?intent, "Answering question directly");
        let view = ManifestView { df, mapping };
        let answer = match intent {
            Intent::DeliveryToday => view.delivery_today(self.today),
            Intent::ShipmentCount if mentions_delayed_or_pending(question) => {
                view.delayed_and_pending()
            }
            Intent::ShipmentCount => format!("Total shipments: {}", df.height()),
            Intent::CarrierLeader => {
                view.leader(StandardField::Carrier, "carrier", "Complete breakdown")
            }
            Intent::StatusDistribution => view.status_distribution(),
            Intent::Weight => view.weight(),
            Intent::Cost => view.cost(),
            Intent::Priority => view.high_priority(),
            Intent::Origin => view.leader(StandardField::Origin, "origin", "All origins"),
            Intent::Destination => {
                view.leader(StandardField::Destination, "destination", "All destinations")
            }
        };
        Some(answer)
    }
}

/// Answers `question` with an engine whose today is the local date.
pub fn answer_direct(df: &DataFrame, mapping: &ColumnMapping, question: &str) -> Option<String> {
    QueryEngine::new().answer_direct(df, mapping, question)
}

struct ManifestView<'a> {
    df: &'a DataFrame,
    mapping: &'a ColumnMapping,
}

impl ManifestView<'_> {
    fn total(&self) -> usize {
        self.df.height()
    }

    fn text(&self, field: StandardField) -> Option<Vec<Option<String>>> {
        let column = self.mapping.get(field)?;
        column_strings(self.df, column)
    }

    fn numbers(&self, field: StandardField) -> Option<Vec<Option<f64>>> {
        let column = self.mapping.get(field)?;
        column_numbers(self.df, column)
    }

    fn available_columns(&self) -> String {
        self.df
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn missing(&self, field: StandardField) -> String {
        format!(
            "{} column not found. Available columns: {}",
            field.display_name(),
            self.available_columns()
        )
    }

    fn missing_numeric(&self, field: StandardField) -> String {
        format!(
            "{} column not found or not numeric. Available columns: {}",
            field.display_name(),
            self.available_columns()
        )
    }

    /// Shipment IDs of the rows selected by `mask`, if the ID column is mapped.
    fn ids_where(&self, mask: &[bool]) -> Option<Vec<String>> {
        let ids = self.text(StandardField::ShipmentId)?;
        Some(
            ids.into_iter()
                .zip(mask)
                .filter(|(_, selected)| **selected)
                .map(|(id, _)| id.unwrap_or_default())
                .collect(),
        )
    }

    fn delayed_and_pending(&self) -> String {
        let Some(statuses) = self.text(StandardField::Status) else {
            return self.missing(StandardField::Status);
        };
        let delayed = mask(&statuses, "delay");
        let pending = mask(&statuses, "pending");
        let delayed_count = count(&delayed);
        let pending_count = count(&pending);

        let mut lines = vec![
            "Delayed and pending shipments:".to_string(),
            String::new(),
            format!("- Delayed shipments: {delayed_count}"),
        ];
        if delayed_count > 0
            && let Some(ids) = self.ids_where(&delayed)
        {
            lines.push(format!("  Shipment IDs: {}", ids.join(", ")));
        }
        lines.push(format!("- Pending shipments: {pending_count}"));
        if pending_count > 0
            && let Some(ids) = self.ids_where(&pending)
        {
            lines.push(format!("  Shipment IDs: {}", ids.join(", ")));
        }
        lines.push(String::new());
        lines.push(format!(
            "Total delayed + pending: {} out of {} total shipments",
            delayed_count + pending_count,
            self.total()
        ));
        lines.push(String::new());
        lines.push("Status breakdown:".to_string());
        lines.extend(breakdown_lines(&value_counts(&statuses), self.total()));
        lines.join("\n")
    }

    /// Most frequent value of `field` followed by the full breakdown.
    fn leader(&self, field: StandardField, noun: &str, heading: &str) -> String {
        let Some(values) = self.text(field) else {
            return self.missing(field);
        };
        let counts = value_counts(&values);
        let Some(top) = counts.first() else {
            return format!("No {noun} values found in {} shipments.", self.total());
        };
        let mut lines = vec![
            format!("Top {noun}: {} with {} shipments", top.value, top.count),
            String::new(),
            format!("{heading}:"),
        ];
        lines.extend(breakdown_lines(&counts, self.total()));
        lines.join("\n")
    }

    fn status_distribution(&self) -> String {
        let Some(statuses) = self.text(StandardField::Status) else {
            return self.missing(StandardField::Status);
        };
        let mut lines = vec!["Status distribution:".to_string()];
        lines.extend(breakdown_lines(&value_counts(&statuses), self.total()));
        lines.push(String::new());
        lines.push(format!("Total shipments: {}", self.total()));
        lines.join("\n")
    }

    fn cost(&self) -> String {
        let Some(values) = self.numbers(StandardField::Cost) else {
            return self.missing_numeric(StandardField::Cost);
        };
        let Some(stats) = NumericStats::from_values(&values) else {
            return format!("No cost values found in {} shipments.", self.total());
        };
        [
            "Cost analysis:".to_string(),
            String::new(),
            format!("- Total cost: {}", format_currency(stats.sum)),
            format!("- Average cost: {}", format_currency(stats.mean)),
            format!(
                "- Cost range: {} - {}",
                format_currency(stats.min),
                format_currency(stats.max)
            ),
            format!("- Number of shipments: {}", self.total()),
        ]
        .join("\n")
    }

    fn weight(&self) -> String {
        let Some(values) = self.numbers(StandardField::Weight) else {
            return self.missing_numeric(StandardField::Weight);
        };
        let Some(stats) = NumericStats::from_values(&values) else {
            return format!("No weight values found in {} shipments.", self.total());
        };
        [
            "Weight analysis:".to_string(),
            String::new(),
            format!("- Total weight: {}", format_grouped(stats.sum)),
            format!("- Average weight: {:.2}", stats.mean),
        ]
        .join("\n")
    }

    fn high_priority(&self) -> String {
        let Some(priorities) = self.text(StandardField::Priority) else {
            return self.missing(StandardField::Priority);
        };
        let high = mask(&priorities, "high");
        let high_count = count(&high);
        let mut lines = vec![format!(
            "High priority shipments: {high_count} out of {} total shipments",
            self.total()
        )];
        if high_count > 0 {
            lines.push(String::new());
            lines.extend(self.id_list("High priority shipment IDs:", &high));
        }
        lines.join("\n")
    }

    fn delivery_today(&self, today: NaiveDate) -> String {
        let Some(dates) = self.text(StandardField::DeliveryDate) else {
            return self.missing(StandardField::DeliveryDate);
        };
        let renderings = [
            today.format("%Y-%m-%d").to_string(),
            today.format("%m/%d/%Y").to_string(),
            today.format("%d/%m/%Y").to_string(),
        ];
        let due: Vec<bool> = dates
            .iter()
            .map(|value| {
                value.as_deref().is_some_and(|value| {
                    renderings.iter().any(|rendered| value.contains(rendered.as_str()))
                        || value.trim().eq_ignore_ascii_case("today")
                })
            })
            .collect();
        let due_count = count(&due);

        let mut lines = vec![
            format!(
                "Shipments scheduled for delivery today: {due_count} out of {} total shipments",
                self.total()
            ),
            String::new(),
        ];
        if due_count > 0 {
            lines.extend(self.id_list("Today's deliveries:", &due));
        } else {
            lines.push(format!("Today's date: {}", renderings[0]));
            lines.push("No shipments scheduled for delivery today.".to_string());
        }
        lines.join("\n")
    }

    fn id_list(&self, heading: &str, selected: &[bool]) -> Vec<String> {
        match self.ids_where(selected) {
            Some(ids) => std::iter::once(heading.to_string())
                .chain(ids.into_iter().map(|id| format!("- {id}")))
                .collect(),
            None => vec!["Shipment ID column not found to list specific shipments.".to_string()],
        }
    }
}

fn mask(values: &[Option<String>], needle: &str) -> Vec<bool> {
    values
        .iter()
        .map(|value| {
            value
                .as_deref()
                .is_some_and(|value| contains_ignore_case(value, needle))
        })
        .collect()
}

fn count(mask: &[bool]) -> usize {
    mask.iter().filter(|selected| **selected).count()
}
