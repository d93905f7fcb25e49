//! Manifest context rendered for the language model.

use polars::prelude::*;
use ship_common::{any_to_string, column_numbers, column_strings, format_currency};
use ship_model::{ColumnMapping, StandardField};

use crate::stats::{NumericStats, contains_ignore_case, value_counts};

/// Number of sample rows and top origins/destinations included.
const SAMPLE_ROWS: usize = 5;

/// System prompt for question answering.
pub const ANSWER_SYSTEM_PROMPT: &str = "You are a logistics data analyst. Answer the question \
using the manifest analysis provided. Use ONLY the exact numbers and facts from the analysis. \
Do not estimate or guess.";

/// System prompt for manifest summaries.
pub const SUMMARY_SYSTEM_PROMPT: &str = "You are an experienced logistics assistant. Based on \
the manifest analysis provided, write a clear and accurate summary. Use the EXACT numbers \
provided. Do not estimate or approximate.";

/// Renders every aggregate the model may need, followed by sample rows.
pub fn render_context(df: &DataFrame, mapping: &ColumnMapping) -> String {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let text = |field: StandardField| {
        mapping
            .get(field)
            .and_then(|column| column_strings(df, column))
    };

    let mut out = String::from("COMPLETE LOGISTICS MANIFEST ANALYSIS:\n\n");
    out.push_str("BASIC INFORMATION:\n");
    out.push_str(&format!("- Total Shipments: {}\n", df.height()));
    out.push_str(&format!("- Total Columns: {}\n", df.width()));
    out.push_str(&format!("- Column Names: {}\n\n", columns.join(", ")));

    if let Some(carriers) = text(StandardField::Carrier) {
        let counts = value_counts(&carriers);
        out.push_str("CARRIER BREAKDOWN:\n");
        for entry in &counts {
            out.push_str(&format!("- {}: {} shipments\n", entry.value, entry.count));
        }
        if let Some(top) = counts.first() {
            out.push_str(&format!(
                "- Top Carrier: {} ({} shipments)\n",
                top.value, top.count
            ));
        }
        out.push('\n');
    }

    if let Some(statuses) = text(StandardField::Status) {
        out.push_str("STATUS BREAKDOWN:\n");
        for entry in value_counts(&statuses) {
            out.push_str(&format!("- {}: {} shipments\n", entry.value, entry.count));
        }
        let delayed: Vec<usize> = statuses
            .iter()
            .enumerate()
            .filter(|(_, status)| {
                status
                    .as_deref()
                    .is_some_and(|status| contains_ignore_case(status, "delay"))
            })
            .map(|(idx, _)| idx)
            .collect();
        if !delayed.is_empty() {
            out.push_str(&format!("- Delayed Shipments: {}\n", delayed.len()));
            if let Some(ids) = text(StandardField::ShipmentId) {
                let delayed_ids: Vec<&str> = delayed
                    .iter()
                    .filter_map(|&idx| ids.get(idx).and_then(|id| id.as_deref()))
                    .collect();
                out.push_str(&format!(
                    "- Delayed Shipment IDs: {}\n",
                    delayed_ids.join(", ")
                ));
            }
        }
        out.push('\n');
    }

    if let Some(stats) = mapping
        .get(StandardField::Cost)
        .and_then(|column| column_numbers(df, column))
        .and_then(|values| NumericStats::from_values(&values))
    {
        out.push_str("COST ANALYSIS:\n");
        out.push_str(&format!("- Total Cost: {}\n", format_currency(stats.sum)));
        out.push_str(&format!("- Average Cost: {}\n", format_currency(stats.mean)));
        out.push_str(&format!("- Min Cost: {}\n", format_currency(stats.min)));
        out.push_str(&format!("- Max Cost: {}\n\n", format_currency(stats.max)));
    }

    for (field, heading) in [
        (StandardField::Origin, "ORIGIN ANALYSIS"),
        (StandardField::Destination, "DESTINATION ANALYSIS"),
    ] {
        if let Some(values) = text(field) {
            out.push_str(&format!("{heading}:\n"));
            for entry in value_counts(&values).iter().take(SAMPLE_ROWS) {
                out.push_str(&format!("- {}: {} shipments\n", entry.value, entry.count));
            }
            out.push('\n');
        }
    }

    out.push_str(&format!("SAMPLE DATA (First {SAMPLE_ROWS} rows):\n"));
    out.push_str(&sample_rows(df, SAMPLE_ROWS));
    out
}

/// Header plus the first `limit` rows, cells joined with ` | `.
fn sample_rows(df: &DataFrame, limit: usize) -> String {
    let mut lines = vec![
        df.get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect::<Vec<_>>()
            .join(" | "),
    ];
    for row in 0..df.height().min(limit) {
        let cells: Vec<String> = df
            .get_columns()
            .iter()
            .map(|column| column.get(row).map(any_to_string).unwrap_or_default())
            .collect();
        lines.push(cells.join(" | "));
    }
    lines.join("\n")
}

/// User prompt for a question about the manifest.
pub fn question_prompt(context: &str, question: &str) -> String {
    format!("Question: {question}\n\nManifest data and analysis:\n{context}\n\nAnswer:")
}

/// User prompt asking for a manifest summary.
pub fn summary_prompt(context: &str) -> String {
    format!(
        "Data analysis:\n{context}\n\nProvide a concise summary highlighting:\n\
1. Total shipments and key metrics\n\
2. Carrier distribution and top performers\n\
3. Status breakdown and any issues\n\
4. Cost analysis if available\n\
5. Any notable patterns or concerns\n\nSummary:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_sections() {
        let df = DataFrame::new(vec![
            Series::new("id".into(), vec!["S1", "S2", "S3"]).into_column(),
            Series::new("carrier".into(), vec!["UPS", "UPS", "DHL"]).into_column(),
            Series::new("status".into(), vec!["delayed", "delivered", "delayed"]).into_column(),
            Series::new("cost".into(), vec![10.0, 20.0, 30.0]).into_column(),
        ])
        .unwrap();
        let names: Vec<String> = ["id", "carrier", "status", "cost"]
            .iter()
            .map(|name| (*name).to_string())
            .collect();
        let mut mapping = ColumnMapping::new();
        mapping.assign(StandardField::ShipmentId, "id", &names).unwrap();
        mapping.assign(StandardField::Carrier, "carrier", &names).unwrap();
        mapping.assign(StandardField::Status, "status", &names).unwrap();
        mapping.assign(StandardField::Cost, "cost", &names).unwrap();

        let context = render_context(&df, &mapping);
        assert!(context.contains("- Total Shipments: 3"));
        assert!(context.contains("- Top Carrier: UPS (2 shipments)"));
        assert!(context.contains("- Delayed Shipment IDs: S1, S3"));
        assert!(context.contains("- Total Cost: $60.00"));
        assert!(!context.contains("ORIGIN ANALYSIS"));
        assert!(context.ends_with("S3 | DHL | delayed | 30"));
    }
}
