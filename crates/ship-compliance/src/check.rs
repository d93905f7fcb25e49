//! Manifest compliance checks.

use std::fmt;

use polars::prelude::DataFrame;
use ship_common::column_strings;
use ship_model::{ColumnMapping, StandardField};

use crate::carriers::ApprovedCarriers;

/// Header spellings of a tracking number column, compared without case,
/// spaces, underscores or hyphens.
const TRACKING_HEADERS: &[&str] = &[
    "trackingnumber",
    "trackingno",
    "trackingref",
    "trackingid",
    "tracking",
];

/// Placeholder for shipments without an ID.
const UNKNOWN_ID: &str = "UNKNOWN";

/// One compliance problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplianceIssue {
    MissingTracking { shipment_id: String },
    UnapprovedCarrier { carrier: String, shipment_id: String },
}

impl fmt::Display for ComplianceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTracking { shipment_id } => {
                write!(f, "Shipment {shipment_id} missing tracking number.")
            }
            Self::UnapprovedCarrier {
                carrier,
                shipment_id,
            } => write!(
                f,
                "Carrier '{carrier}' in shipment {shipment_id} not approved."
            ),
        }
    }
}

/// Issues found in a manifest, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplianceReport {
    pub issues: Vec<ComplianceIssue>,
    /// Name of the tracking column, if one was found.
    pub tracking_column: Option<String>,
}

impl ComplianceReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Human-readable lines; a single "no issues" line when clean.
    pub fn lines(&self) -> Vec<String> {
        if self.issues.is_empty() {
            return vec!["No compliance issues found.".to_string()];
        }
        self.issues.iter().map(ToString::to_string).collect()
    }
}

/// Finds the tracking number column by header.
pub fn find_tracking_column(df: &DataFrame) -> Option<String> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    TRACKING_HEADERS.iter().find_map(|wanted| {
        names
            .iter()
            .find(|name| squash(name) == *wanted)
            .cloned()
    })
}

fn squash(header: &str) -> String {
    header
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn blank(value: Option<&str>) -> bool {
    value.is_none_or(|value| value.trim().is_empty())
}

/// Reports rows without a tracking number and rows whose carrier is not
/// approved. Checks whose column is absent are skipped.
pub fn check_compliance(
    df: &DataFrame,
    mapping: &ColumnMapping,
    approved: &ApprovedCarriers,
) -> ComplianceReport {
    let text = |column: Option<&str>| column.and_then(|column| column_strings(df, column));
    let ids = text(mapping.get(StandardField::ShipmentId));
    let carriers = text(mapping.get(StandardField::Carrier));
    let tracking_column = find_tracking_column(df);
    let tracking = text(tracking_column.as_deref());

    let id_at = |row: usize| {
        ids.as_ref()
            .and_then(|ids| ids[row].clone())
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_ID.to_string())
    };

    let mut issues = Vec::new();
    if let Some(tracking) = &tracking {
        for (row, value) in tracking.iter().enumerate() {
            if blank(value.as_deref()) {
                issues.push(ComplianceIssue::MissingTracking {
                    shipment_id: id_at(row),
                });
            }
        }
    }
    if let Some(carriers) = &carriers {
        for (row, carrier) in carriers.iter().enumerate() {
            let Some(carrier) = carrier.as_deref().map(str::trim) else {
                continue;
            };
            if !carrier.is_empty() && !approved.contains(carrier) {
                issues.push(ComplianceIssue::UnapprovedCarrier {
                    carrier: carrier.to_string(),
                    shipment_id: id_at(row),
                });
            }
        }
    }

    ComplianceReport {
        issues,
        tracking_column,
    }
}

/// Distinct carriers in a manifest split by approval.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarrierCheck {
    /// Distinct carriers in first-seen order.
    pub carriers: Vec<String>,
    pub unapproved: Vec<String>,
}

impl CarrierCheck {
    pub fn approved_count(&self) -> usize {
        self.carriers.len() - self.unapproved.len()
    }
}

/// Compares the manifest's distinct carriers with the approved list.
///
/// Returns `None` when the carrier field is not mapped.
pub fn check_carriers(
    df: &DataFrame,
    mapping: &ColumnMapping,
    approved: &ApprovedCarriers,
) -> Option<CarrierCheck> {
    let values = column_strings(df, mapping.get(StandardField::Carrier)?)?;
    let mut check = CarrierCheck::default();
    for carrier in values.iter().flatten().map(String::as_str).map(str::trim) {
        if carrier.is_empty() || check.carriers.iter().any(|seen| seen == carrier) {
            continue;
        }
        check.carriers.push(carrier.to_string());
        if !approved.contains(carrier) {
            check.unapproved.push(carrier.to_string());
        }
    }
    Some(check)
}
