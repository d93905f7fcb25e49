//! Loading manifests from disk.

use std::fs;

use ship_ingest::{IngestError, LoadOptions, build_quality_report, load_manifest};
use tempfile::tempdir;

#[test]
fn csv_headers_are_normalized() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manifest.csv");
    fs::write(
        &path,
        "Shipment ID,Carrier Name,Total-Cost\nS1,UPS,10\nS2,DHL,\nS1,UPS,10\n",
    )
    .unwrap();

    let df = load_manifest(&path, &LoadOptions::default()).unwrap();
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["shipment_id", "carrier_name", "total_cost"]);
    assert_eq!(df.height(), 3);

    let report = build_quality_report(&df);
    assert_eq!(report.rows, 3);
    assert_eq!(report.duplicate_rows, 1);
    assert!(report.completeness < 100.0);
}

#[test]
fn raw_headers_can_be_kept() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manifest.csv");
    fs::write(&path, "Shipment ID,Carrier\nS1,UPS\n").unwrap();

    let options = LoadOptions::default().with_normalize_headers(false);
    let df = load_manifest(&path, &options).unwrap();
    assert!(df.column("Shipment ID").is_ok());
}

#[test]
fn unsupported_and_missing_files_fail() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manifest.txt");
    fs::write(&path, "a,b\n1,2\n").unwrap();
    assert!(matches!(
        load_manifest(&path, &LoadOptions::default()),
        Err(IngestError::UnsupportedFormat { .. })
    ));

    assert!(matches!(
        load_manifest(&dir.path().join("gone.csv"), &LoadOptions::default()),
        Err(IngestError::FileNotFound { .. })
    ));
}

#[test]
fn header_only_csv_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manifest.csv");
    fs::write(&path, "carrier,origin\n").unwrap();
    assert!(matches!(
        load_manifest(&path, &LoadOptions::default()),
        Err(IngestError::EmptyManifest { .. })
    ));
}

#[test]
fn late_unparseable_value_still_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manifest.csv");
    let mut text = String::from("Shipment ID,Carrier,Cost\n");
    for i in 0..150 {
        text.push_str(&format!("S{i},UPS,{i}.50\n"));
    }
    text.push_str("S999,UPS,N/A\n");
    fs::write(&path, text).unwrap();

    let df = load_manifest(&path, &LoadOptions::default()).unwrap();
    assert_eq!(df.height(), 151);
    let cost = df.column("cost").unwrap().str().unwrap();
    assert_eq!(cost.get(0), Some("0.50"));
    assert_eq!(cost.get(150), Some("N/A"));
}
