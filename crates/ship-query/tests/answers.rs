//! Direct answers over a small cleaned manifest.

use chrono::NaiveDate;
use insta::assert_snapshot;
use polars::prelude::*;
use ship_model::{ColumnMapping, StandardField};
use ship_query::QueryEngine;

fn mapped(df: &DataFrame, fields: &[(StandardField, &str)]) -> ColumnMapping {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut mapping = ColumnMapping::new();
    for (field, column) in fields {
        mapping.assign(*field, column, &names).unwrap();
    }
    mapping
}

fn engine() -> QueryEngine {
    QueryEngine::with_today(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
}

#[test]
fn cost_summary_uses_row_count() {
    let df = DataFrame::new(vec![
        Series::new("Freight Cost".into(), vec![Some(25.50), Some(45.20), None]).into_column(),
    ])
    .unwrap();
    let mapping = mapped(&df, &[(StandardField::Cost, "Freight Cost")]);

    let answer = engine()
        .answer_direct(&df, &mapping, "What is the average shipping cost?")
        .unwrap();
    assert_snapshot!(answer, @r"
    Cost analysis:

    - Total cost: $70.70
    - Average cost: $35.35
    - Cost range: $25.50 - $45.20
    - Number of shipments: 3
    ");
}

#[test]
fn status_breakdown_reports_percentages() {
    let df = DataFrame::new(vec![
        Series::new("Status".into(), vec!["Delivered", "Delayed", "In Transit", "Delayed"])
            .into_column(),
    ])
    .unwrap();
    let mapping = mapped(&df, &[(StandardField::Status, "Status")]);

    let answer = engine()
        .answer_direct(&df, &mapping, "What is the distribution of shipment statuses?")
        .unwrap();
    assert!(answer.contains("Delayed: 2 (50.0%)"));
    assert!(answer.contains("Delivered: 1 (25.0%)"));
    assert!(answer.ends_with("Total shipments: 4"));
}

#[test]
fn delayed_and_pending_lists_ids() {
    let df = DataFrame::new(vec![
        Series::new("Shipment ID".into(), vec!["A1", "A2", "A3", "A4"]).into_column(),
        Series::new("Status".into(), vec!["delayed", "pending pickup", "delivered", "Delayed"])
            .into_column(),
    ])
    .unwrap();
    let mapping = mapped(
        &df,
        &[
            (StandardField::ShipmentId, "Shipment ID"),
            (StandardField::Status, "Status"),
        ],
    );

    let answer = engine()
        .answer_direct(&df, &mapping, "How many shipments are delayed or pending?")
        .unwrap();
    assert!(answer.contains("- Delayed shipments: 2\n  Shipment IDs: A1, A4"));
    assert!(answer.contains("- Pending shipments: 1\n  Shipment IDs: A2"));
    assert!(answer.contains("Total delayed + pending: 3 out of 4 total shipments"));
    assert!(answer.contains("- delivered: 1 (25.0%)"));
}

#[test]
fn carrier_leader_and_breakdown() {
    let df = DataFrame::new(vec![
        Series::new("Carrier".into(), vec!["FedEx", "UPS", "FedEx", "DHL"]).into_column(),
    ])
    .unwrap();
    let mapping = mapped(&df, &[(StandardField::Carrier, "Carrier")]);

    let answer = engine()
        .answer_direct(&df, &mapping, "Which carrier has the most shipments?")
        .unwrap();
    assert_snapshot!(answer, @r"
    Top carrier: FedEx with 2 shipments

    Complete breakdown:
    - FedEx: 2 (50.0%)
    - UPS: 1 (25.0%)
    - DHL: 1 (25.0%)
    ");
}

#[test]
fn missing_weight_column_names_available_columns() {
    let df = DataFrame::new(vec![
        Series::new("Carrier".into(), vec!["FedEx"]).into_column(),
        Series::new("Origin".into(), vec!["Boston"]).into_column(),
    ])
    .unwrap();
    let mapping = mapped(&df, &[(StandardField::Carrier, "Carrier")]);

    let answer = engine()
        .answer_direct(&df, &mapping, "What is the total weight of all shipments?")
        .unwrap();
    assert_eq!(
        answer,
        "Weight column not found or not numeric. Available columns: Carrier, Origin"
    );
}

#[test]
fn weight_totals_are_grouped() {
    let df = DataFrame::new(vec![
        Series::new("weight".into(), vec![1200.0, 850.5]).into_column(),
    ])
    .unwrap();
    let mapping = mapped(&df, &[(StandardField::Weight, "weight")]);

    let answer = engine()
        .answer_direct(&df, &mapping, "What is the total weight of all shipments?")
        .unwrap();
    assert!(answer.contains("- Total weight: 2,050.50"));
    assert!(answer.contains("- Average weight: 1025.25"));
}

#[test]
fn top_destination() {
    let df = DataFrame::new(vec![
        Series::new("dest".into(), vec!["Chicago", "Denver", "Chicago"]).into_column(),
    ])
    .unwrap();
    let mapping = mapped(&df, &[(StandardField::Destination, "dest")]);

    let answer = engine()
        .answer_direct(&df, &mapping, "Which destinations appear most frequently?")
        .unwrap();
    assert!(answer.starts_with("Top destination: Chicago with 2 shipments"));
    assert!(answer.contains("All destinations:\n- Chicago: 2 (66.7%)\n- Denver: 1 (33.3%)"));
}
