use polars::prelude::*;
use proptest::prelude::*;
use ship_model::{ColumnMapping, StandardField};
use ship_normalization::clean;

fn mapping_for(columns: &[&str], fields: &[StandardField]) -> ColumnMapping {
    let names: Vec<String> = columns.iter().map(ToString::to_string).collect();
    let mut mapping = ColumnMapping::new();
    for (field, column) in fields.iter().zip(columns) {
        mapping.assign(*field, column, &names).unwrap();
    }
    mapping
}

fn raw_value() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        "[ a-zA-Z]{0,10}".prop_map(Some),
        "[$]?[0-9]{1,4}(\\.[0-9]{1,2})?".prop_map(Some),
        "20[0-9]{2}-0[1-9]-[12][0-9]".prop_map(Some),
        "0[1-9]/[12][0-9]/20[0-9]{2}".prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn clean_twice_equals_clean_once(
        rows in proptest::collection::vec(
            (raw_value(), raw_value(), raw_value(), raw_value()),
            1..20,
        )
    ) {
        let carriers: Vec<Option<String>> = rows.iter().map(|row| row.0.clone()).collect();
        let statuses: Vec<Option<String>> = rows.iter().map(|row| row.1.clone()).collect();
        let costs: Vec<Option<String>> = rows.iter().map(|row| row.2.clone()).collect();
        let dates: Vec<Option<String>> = rows.iter().map(|row| row.3.clone()).collect();
        let df = DataFrame::new(vec![
            Series::new("carrier".into(), carriers).into_column(),
            Series::new("status".into(), statuses).into_column(),
            Series::new("cost".into(), costs).into_column(),
            Series::new("eta".into(), dates).into_column(),
        ])
        .unwrap();
        let mapping = mapping_for(
            &["carrier", "status", "cost", "eta"],
            &[
                StandardField::Carrier,
                StandardField::Status,
                StandardField::Cost,
                StandardField::DeliveryDate,
            ],
        );

        let once = clean(&df, &mapping).unwrap();
        let twice = clean(&once, &mapping).unwrap();
        prop_assert!(once.equals_missing(&twice));
    }
}

#[test]
fn unmapped_fields_are_skipped() {
    let df = DataFrame::new(vec![
        Series::new("Carrier".into(), vec!["  ups"]).into_column(),
        Series::new("notes".into(), vec!["  keep me "]).into_column(),
    ])
    .unwrap();
    let mapping = mapping_for(&["Carrier"], &[StandardField::Carrier]);
    let cleaned = clean(&df, &mapping).unwrap();
    assert_eq!(
        cleaned.column("Carrier").unwrap().get(0).unwrap(),
        AnyValue::String("Ups")
    );
    assert_eq!(
        cleaned.column("notes").unwrap().get(0).unwrap(),
        AnyValue::String("  keep me ")
    );
}
