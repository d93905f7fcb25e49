//! Standard logistics fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MappingError;

/// How values of a standard field are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text (identifiers, names, statuses).
    Text,
    /// Numeric amount (weights, costs).
    Number,
    /// Calendar date.
    Date,
}

/// A canonical logistics attribute.
///
/// Declaration order is the resolution order: when two fields could claim the
/// same column, the earlier field wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardField {
    ShipmentId,
    Carrier,
    Origin,
    Destination,
    Weight,
    Status,
    Date,
    DeliveryDate,
    Cost,
    Priority,
}

/// Fields a manifest must map before route and carrier analysis can run.
pub const DEFAULT_REQUIRED_FIELDS: [StandardField; 3] = [
    StandardField::Carrier,
    StandardField::Origin,
    StandardField::Destination,
];

impl StandardField {
    /// All fields in resolution order.
    pub const ALL: [StandardField; 10] = [
        StandardField::ShipmentId,
        StandardField::Carrier,
        StandardField::Origin,
        StandardField::Destination,
        StandardField::Weight,
        StandardField::Status,
        StandardField::Date,
        StandardField::DeliveryDate,
        StandardField::Cost,
        StandardField::Priority,
    ];

    /// Snake-case identifier used in configs and CLI arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShipmentId => "shipment_id",
            Self::Carrier => "carrier",
            Self::Origin => "origin",
            Self::Destination => "destination",
            Self::Weight => "weight",
            Self::Status => "status",
            Self::Date => "date",
            Self::DeliveryDate => "delivery_date",
            Self::Cost => "cost",
            Self::Priority => "priority",
        }
    }

    /// Human-readable label.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ShipmentId => "Shipment ID",
            Self::Carrier => "Carrier",
            Self::Origin => "Origin",
            Self::Destination => "Destination",
            Self::Weight => "Weight",
            Self::Status => "Status",
            Self::Date => "Date",
            Self::DeliveryDate => "Delivery date",
            Self::Cost => "Cost",
            Self::Priority => "Priority",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Weight | Self::Cost => FieldKind::Number,
            Self::Date | Self::DeliveryDate => FieldKind::Date,
            Self::ShipmentId
            | Self::Carrier
            | Self::Origin
            | Self::Destination
            | Self::Status
            | Self::Priority => FieldKind::Text,
        }
    }
}

impl fmt::Display for StandardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StandardField {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == wanted)
            .ok_or_else(|| MappingError::FieldNotFound(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_sorted_in_declaration_order() {
        let mut sorted = StandardField::ALL;
        sorted.sort();
        assert_eq!(sorted, StandardField::ALL);
    }

    #[test]
    fn test_from_str_accepts_spaced_names() {
        assert_eq!(
            "Delivery Date".parse::<StandardField>().unwrap(),
            StandardField::DeliveryDate
        );
        assert_eq!("cost".parse::<StandardField>().unwrap(), StandardField::Cost);
        assert!("volume".parse::<StandardField>().is_err());
    }

    #[test]
    fn test_kinds() {
        assert_eq!(StandardField::Cost.kind(), FieldKind::Number);
        assert_eq!(StandardField::Date.kind(), FieldKind::Date);
        assert_eq!(StandardField::Status.kind(), FieldKind::Text);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&StandardField::ShipmentId).unwrap();
        assert_eq!(json, "\"shipment_id\"");
    }
}
