//! Compliance checks over a manifest with known problems.

use insta::assert_snapshot;
use polars::prelude::*;
use ship_compliance::{
    AlertTone, ApprovedCarriers, ComplianceIssue, check_carriers, check_compliance,
    delayed_shipments, render_alert,
};
use ship_model::{ColumnMapping, StandardField};

fn problem_manifest() -> (DataFrame, ColumnMapping) {
    let df = DataFrame::new(vec![
        Series::new("Shipment ID".into(), vec!["SHP020", "SHP021", "SHP022", "SHP023"])
            .into_column(),
        Series::new("Carrier".into(), vec!["UnauthorizedCarrier", "fedex", "DHL", "BadCarrier"])
            .into_column(),
        Series::new("Status".into(), vec!["Delayed", "Delivered", "In Transit", "Delayed"])
            .into_column(),
        Series::new("Tracking Ref".into(), vec![None, Some("TR021"), Some(" "), Some("TR023")])
            .into_column(),
        Series::new(
            "Expected Arrival".into(),
            vec!["2024-05-02", "2024-05-03", "2024-05-04", "2024-05-05"],
        )
        .into_column(),
    ])
    .unwrap();
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut mapping = ColumnMapping::new();
    for (field, column) in [
        (StandardField::ShipmentId, "Shipment ID"),
        (StandardField::Carrier, "Carrier"),
        (StandardField::Status, "Status"),
        (StandardField::DeliveryDate, "Expected Arrival"),
    ] {
        mapping.assign(field, column, &names).unwrap();
    }
    (df, mapping)
}

#[test]
fn reports_missing_tracking_and_unapproved_carriers() {
    let (df, mapping) = problem_manifest();
    let report = check_compliance(&df, &mapping, &ApprovedCarriers::defaults());

    assert_eq!(report.tracking_column.as_deref(), Some("Tracking Ref"));
    assert_eq!(
        report.issues,
        vec![
            ComplianceIssue::MissingTracking {
                shipment_id: "SHP020".to_string()
            },
            ComplianceIssue::MissingTracking {
                shipment_id: "SHP022".to_string()
            },
            ComplianceIssue::UnapprovedCarrier {
                carrier: "UnauthorizedCarrier".to_string(),
                shipment_id: "SHP020".to_string()
            },
            ComplianceIssue::UnapprovedCarrier {
                carrier: "BadCarrier".to_string(),
                shipment_id: "SHP023".to_string()
            },
        ]
    );
    assert_eq!(
        report.lines()[2],
        "Carrier 'UnauthorizedCarrier' in shipment SHP020 not approved."
    );
}

#[test]
fn carrier_check_splits_distinct_carriers() {
    let (df, mapping) = problem_manifest();
    let check = check_carriers(&df, &mapping, &ApprovedCarriers::defaults()).unwrap();
    assert_eq!(check.carriers.len(), 4);
    assert_eq!(check.approved_count(), 2);
    assert_eq!(check.unapproved, vec!["UnauthorizedCarrier", "BadCarrier"]);
}

#[test]
fn delay_alert_lists_each_shipment() {
    let (df, mapping) = problem_manifest();
    let delayed = delayed_shipments(&df, &mapping).unwrap();
    assert_eq!(delayed.len(), 2);

    assert_snapshot!(render_alert(&delayed, AlertTone::Formal), @r"
    Please be advised that the following shipments are currently delayed.

    2 shipments currently delayed:

    - Shipment ID: SHP020
      Status: Delayed
      Expected Arrival: 2024-05-02
      Action: Contact the carrier for an updated ETA.

    - Shipment ID: SHP023
      Status: Delayed
      Expected Arrival: 2024-05-05
      Action: Contact the carrier for an updated ETA.
    ");
}

#[test]
fn delay_alert_needs_status() {
    let (df, _) = problem_manifest();
    assert!(delayed_shipments(&df, &ColumnMapping::new()).is_err());
}
