//! Geocoding a manifest offline and analysing its routes.

use polars::prelude::*;
use ship_geo::{
    COST_PER_MILE_COLUMN, CoordinateResolver, DISTANCE_COLUMN, NominatimClient, add_coordinates,
    add_route_columns, analyze_routes, haversine, validate_geographic_data,
};
use ship_model::{ColumnMapping, StandardField};

fn manifest() -> (DataFrame, ColumnMapping) {
    let df = DataFrame::new(vec![
        Series::new("Shipment ID".into(), vec!["SHP001", "SHP002", "SHP003", "SHP004"])
            .into_column(),
        Series::new("Carrier".into(), vec!["DPD", "FedEx", "DPD", "UPS"]).into_column(),
        Series::new("Origin".into(), vec!["New York", "Los Angeles", "Boston", "Seattle"])
            .into_column(),
        Series::new("Destination".into(), vec!["Miami", "Denver", "Boston", "Portland"])
            .into_column(),
        Series::new("Cost".into(), vec![Some(12.5), Some(48.0), Some(13.0), None]).into_column(),
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
        (StandardField::Origin, "Origin"),
        (StandardField::Destination, "Destination"),
        (StandardField::Cost, "Cost"),
    ] {
        mapping.assign(field, column, &names).unwrap();
    }
    (df, mapping)
}

#[test]
fn london_to_manchester_is_about_163_miles() {
    let distance = haversine(51.5074, -0.1278, 53.4808, -2.2426);
    assert!((distance - 163.0).abs() <= 5.0, "{distance}");
}

#[test]
fn offline_enrichment_supports_route_analysis() {
    let (df, mapping) = manifest();
    let mut resolver = CoordinateResolver::<NominatimClient>::offline();
    let (enriched, summary) = add_coordinates(&df, &mapping, &mut resolver).unwrap();

    assert_eq!(summary.origins_resolved, 4);
    assert_eq!(summary.destinations_resolved, 4);
    assert!(summary.unresolved.is_empty());
    assert!(validate_geographic_data(&enriched));

    let report = analyze_routes(&enriched, &mapping).unwrap();
    assert_eq!(report.routes.len(), 4);
    assert_eq!(report.skipped_rows, 0);

    let longest = report.longest.as_ref().unwrap();
    assert_eq!(longest.shipment_id.as_deref(), Some("SHP001"));
    let shortest = report.shortest.as_ref().unwrap();
    assert_eq!(shortest.label(), "Boston -> Boston");
    assert_eq!(shortest.distance_miles, 0.0);
    assert_eq!(shortest.cost_per_mile, None);

    assert_eq!(report.total_cost, Some(73.5));
    let most = report.most_efficient.as_ref().unwrap();
    assert_eq!(most.shipment_id.as_deref(), Some("SHP001"));
    let least = report.least_efficient.as_ref().unwrap();
    assert_eq!(least.shipment_id.as_deref(), Some("SHP002"));

    assert_eq!(report.carriers[0].carrier, "DPD");
    assert_eq!(report.carriers[0].shipments, 2);
}

#[test]
fn route_columns_are_appended() {
    let (df, mapping) = manifest();
    let mut resolver = CoordinateResolver::<NominatimClient>::offline();
    let (enriched, _) = add_coordinates(&df, &mapping, &mut resolver).unwrap();
    let with_routes = add_route_columns(&enriched, &mapping).unwrap();

    let distance = with_routes.column(DISTANCE_COLUMN).unwrap();
    assert_eq!(distance.null_count(), 0);
    let per_mile = with_routes.column(COST_PER_MILE_COLUMN).unwrap();
    // zero-length route and missing cost
    assert_eq!(per_mile.null_count(), 2);
}

#[test]
fn routes_need_coordinates() {
    let (df, mapping) = manifest();
    assert!(analyze_routes(&df, &mapping).is_err());
}
