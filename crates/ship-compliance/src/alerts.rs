//! Delay alerts.

use std::fmt;
use std::str::FromStr;

use polars::prelude::DataFrame;
use ship_common::column_strings;
use ship_model::{ColumnMapping, StandardField};

use crate::error::{ComplianceError, Result};

/// Suggested action for every delayed shipment.
pub const DEFAULT_ACTION: &str = "Contact the carrier for an updated ETA.";

/// Shown for fields the manifest does not have.
const NOT_AVAILABLE: &str = "N/A";

/// A shipment whose status mentions a delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayedShipment {
    pub row: usize,
    pub shipment_id: String,
    pub status: String,
    pub expected_arrival: String,
    pub carrier: Option<String>,
    pub action: String,
}

/// Tone of a rendered alert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlertTone {
    #[default]
    Standard,
    Urgent,
    Formal,
}

impl AlertTone {
    pub const ALL: [AlertTone; 3] = [AlertTone::Standard, AlertTone::Urgent, AlertTone::Formal];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Urgent => "urgent",
            Self::Formal => "formal",
        }
    }
}

impl fmt::Display for AlertTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertTone {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "friendly" => Ok(Self::Standard),
            "urgent" => Ok(Self::Urgent),
            "formal" => Ok(Self::Formal),
            other => Err(format!(
                "unknown alert tone '{other}' (expected standard, urgent or formal)"
            )),
        }
    }
}

/// Collects shipments whose status contains "delay", ignoring case.
///
/// # Errors
///
/// Fails when the status field is not mapped.
pub fn delayed_shipments(df: &DataFrame, mapping: &ColumnMapping) -> Result<Vec<DelayedShipment>> {
    let text = |field: StandardField| {
        mapping
            .get(field)
            .and_then(|column| column_strings(df, column))
    };
    let statuses = text(StandardField::Status)
        .ok_or(ComplianceError::FieldNotMapped(StandardField::Status))?;
    let ids = text(StandardField::ShipmentId);
    let arrivals = text(StandardField::DeliveryDate);
    let carriers = text(StandardField::Carrier);

    let value_at = |values: &Option<Vec<Option<String>>>, row: usize| {
        values
            .as_ref()
            .and_then(|values| values[row].clone())
            .filter(|value| !value.trim().is_empty())
    };

    Ok(statuses
        .iter()
        .enumerate()
        .filter_map(|(row, status)| {
            let status = status.as_deref()?;
            if !status.to_lowercase().contains("delay") {
                return None;
            }
            Some(DelayedShipment {
                row,
                shipment_id: value_at(&ids, row).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                status: status.to_string(),
                expected_arrival: value_at(&arrivals, row)
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                carrier: value_at(&carriers, row),
                action: DEFAULT_ACTION.to_string(),
            })
        })
        .collect())
}

/// Renders an alert for `shipments` in the given tone.
pub fn render_alert(shipments: &[DelayedShipment], tone: AlertTone) -> String {
    if shipments.is_empty() {
        return "All shipments are currently on time.".to_string();
    }
    let count = shipments.len();
    let plural = if count == 1 { "" } else { "s" };
    let mut body = format!("{count} shipment{plural} currently delayed:\n");
    for shipment in shipments {
        body.push_str(&format!(
            "\n- Shipment ID: {}\n  Status: {}\n  Expected Arrival: {}\n  Action: {}\n",
            shipment.shipment_id, shipment.status, shipment.expected_arrival, shipment.action
        ));
    }
    match tone {
        AlertTone::Standard => body,
        AlertTone::Urgent => format!(
            "URGENT: There {} {count} delayed shipment{plural}. Please review the details immediately.\n\n{body}",
            if count == 1 { "is" } else { "are" }
        ),
        AlertTone::Formal => format!(
            "Please be advised that the following shipments are currently delayed.\n\n{body}"
        ),
    }
}

/// Delay share and per-carrier delay counts.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayStats {
    pub delayed: usize,
    pub total: usize,
    pub percentage: f64,
    /// Most delays first; ties keep first-seen order.
    pub by_carrier: Vec<(String, usize)>,
}

impl DelayStats {
    pub fn compute(shipments: &[DelayedShipment], total: usize) -> Self {
        let mut by_carrier: Vec<(String, usize)> = Vec::new();
        for carrier in shipments.iter().filter_map(|s| s.carrier.as_deref()) {
            match by_carrier.iter_mut().find(|(name, _)| name == carrier) {
                Some((_, count)) => *count += 1,
                None => by_carrier.push((carrier.to_string(), 1)),
            }
        }
        by_carrier.sort_by(|a, b| b.1.cmp(&a.1));
        let percentage = if total == 0 {
            0.0
        } else {
            shipments.len() as f64 / total as f64 * 100.0
        };
        Self {
            delayed: shipments.len(),
            total,
            percentage,
            by_carrier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipment(id: &str, carrier: Option<&str>) -> DelayedShipment {
        DelayedShipment {
            row: 0,
            shipment_id: id.to_string(),
            status: "Delayed".to_string(),
            expected_arrival: NOT_AVAILABLE.to_string(),
            carrier: carrier.map(str::to_string),
            action: DEFAULT_ACTION.to_string(),
        }
    }

    #[test]
    fn test_tone_parsing() {
        assert_eq!("Friendly".parse::<AlertTone>().unwrap(), AlertTone::Standard);
        assert_eq!("URGENT".parse::<AlertTone>().unwrap(), AlertTone::Urgent);
        assert!("angry".parse::<AlertTone>().is_err());
    }

    #[test]
    fn test_single_shipment_wording() {
        let alert = render_alert(&[shipment("S1", None)], AlertTone::Urgent);
        assert!(alert.starts_with("URGENT: There is 1 delayed shipment."));
        assert!(alert.contains("1 shipment currently delayed:"));
    }

    #[test]
    fn test_no_delays() {
        assert_eq!(
            render_alert(&[], AlertTone::Formal),
            "All shipments are currently on time."
        );
    }

    #[test]
    fn test_delay_stats() {
        let shipments = [
            shipment("S1", Some("UPS")),
            shipment("S2", Some("DHL")),
            shipment("S3", Some("DHL")),
            shipment("S4", None),
        ];
        let stats = DelayStats::compute(&shipments, 8);
        assert_eq!(stats.percentage, 50.0);
        assert_eq!(
            stats.by_carrier,
            vec![("DHL".to_string(), 2), ("UPS".to_string(), 1)]
        );
    }
}
