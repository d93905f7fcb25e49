//! Carrier compliance, key metrics and delay alerts.

mod alerts;
mod carriers;
mod check;
mod error;
mod metrics;

pub use alerts::{
    AlertTone, DEFAULT_ACTION, DelayStats, DelayedShipment, delayed_shipments, render_alert,
};
pub use carriers::{ApprovedCarriers, DEFAULT_CARRIERS};
pub use check::{
    CarrierCheck, ComplianceIssue, ComplianceReport, check_carriers, check_compliance,
    find_tracking_column,
};
pub use error::{ComplianceError, Result};
pub use metrics::KeyMetrics;
