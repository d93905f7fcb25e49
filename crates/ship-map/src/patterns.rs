//! Candidate column names for each standard field.

use ship_model::StandardField;

/// Candidate names for `field`, highest priority first.
pub fn candidates(field: StandardField) -> &'static [&'static str] {
    match field {
        StandardField::ShipmentId => &[
            "shipment_id",
            "shipment id",
            "id",
            "tracking_number",
            "tracking number",
        ],
        StandardField::Carrier => &[
            "carrier",
            "carrier_name",
            "carrier name",
            "shipping_company",
            "shipping company",
        ],
        StandardField::Origin => &[
            "origin",
            "origin_city",
            "origin city",
            "from",
            "pickup_location",
            "pickup location",
        ],
        StandardField::Destination => &[
            "destination",
            "destination_city",
            "destination city",
            "to",
            "delivery_location",
            "delivery location",
        ],
        StandardField::Weight => &[
            "weight",
            "weight_kg",
            "weight kg",
            "total_weight",
            "total weight",
        ],
        StandardField::Status => &[
            "status",
            "shipment_status",
            "shipment status",
            "delivery_status",
            "delivery status",
        ],
        StandardField::Date => &[
            "date",
            "ship_date",
            "ship date",
            "pickup_date",
            "pickup date",
            "created_date",
            "created date",
        ],
        StandardField::DeliveryDate => &[
            "delivery_date",
            "delivery date",
            "expected_delivery",
            "expected delivery",
            "eta",
        ],
        StandardField::Cost => &[
            "cost",
            "shipping_cost",
            "shipping cost",
            "price",
            "amount",
            "total_cost",
            "total cost",
        ],
        StandardField::Priority => &[
            "priority",
            "priority_level",
            "priority level",
            "urgency",
            "service_level",
            "service level",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_candidates() {
        for field in StandardField::ALL {
            let list = candidates(field);
            assert!(!list.is_empty(), "{field} has no candidates");
            assert_eq!(list[0], field.as_str());
        }
    }
}
