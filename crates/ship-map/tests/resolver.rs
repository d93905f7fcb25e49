use proptest::prelude::*;
use ship_map::{resolve, suggest, validate_default_required};
use ship_model::StandardField;

fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[test]
fn resolves_typical_manifest_headers() {
    let columns = cols(&[
        "shipment_id",
        "carrier_name",
        "origin_city",
        "destination_city",
        "weight_kg",
        "shipment_status",
        "ship_date",
        "eta",
        "shipping_cost",
        "service_level",
    ]);
    let mapping = resolve(&columns);
    assert_eq!(mapping.len(), StandardField::ALL.len());
    assert_eq!(mapping.get(StandardField::DeliveryDate), Some("eta"));
    assert_eq!(mapping.get(StandardField::Priority), Some("service_level"));
    assert!(suggest(&columns, &mapping).is_empty());
}

#[test]
fn unmapped_required_fields_get_suggestions() {
    let columns = cols(&["Shipper Carrier", "Pickup City", "Drop City"]);
    let mapping = resolve(&columns);
    let (valid, missing) = validate_default_required(&mapping);
    assert!(!valid);
    assert_eq!(missing.len(), 3);

    let suggestions = suggest(&columns, &mapping);
    let carrier = &suggestions[&StandardField::Carrier];
    assert_eq!(carrier[0].source_column, "Shipper Carrier");
}

proptest! {
    #[test]
    fn resolve_is_deterministic_and_injective(
        names in proptest::collection::vec(
            prop_oneof![
                Just("Carrier".to_string()),
                Just("carrier_name".to_string()),
                Just("ID".to_string()),
                Just("Date".to_string()),
                Just("ship date".to_string()),
                Just("Delivery Date".to_string()),
                Just("to".to_string()),
                Just("from".to_string()),
                "[a-z_ ]{1,12}",
            ],
            0..12,
        )
    ) {
        let first = resolve(&names);
        let second = resolve(&names);
        prop_assert_eq!(&first, &second);

        let mut used: Vec<&str> = first.iter().map(|(_, column)| column).collect();
        let total = used.len();
        used.sort_unstable();
        used.dedup();
        prop_assert_eq!(used.len(), total);
    }
}
