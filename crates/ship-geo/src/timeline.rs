//! Transit time analytics from departure and delivery dates.

use chrono::NaiveDate;
use polars::prelude::*;
use ship_common::{column_strings, column_text, date_from_days};
use ship_model::{ColumnMapping, StandardField};
use ship_normalization::parse_date;

use crate::error::{GeoError, Result};

/// One shipment with both dates parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitRecord {
    pub row: usize,
    pub shipment_id: Option<String>,
    pub departure: NaiveDate,
    pub arrival: NaiveDate,
    /// Days from departure to arrival; negative when arrival is earlier.
    pub transit_days: i64,
    pub status: Option<String>,
}

/// Summary over every shipment with both dates.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineReport {
    pub records: Vec<TransitRecord>,
    pub unparsed_departures: usize,
    pub unparsed_arrivals: usize,
    pub average_days: Option<f64>,
    pub shortest_days: Option<i64>,
    pub longest_days: Option<i64>,
}

/// Reads a column as calendar dates.
///
/// `Date` columns are read directly; anything else is parsed as text.
fn column_dates(column: &Column) -> Vec<Option<NaiveDate>> {
    if column.dtype() == &DataType::Date {
        return (0..column.len())
            .map(|idx| match column.get(idx) {
                Ok(AnyValue::Date(days)) => date_from_days(days),
                _ => None,
            })
            .collect();
    }
    column_text(column)
        .into_iter()
        .map(|value| value.as_deref().and_then(parse_date))
        .collect()
}

fn mapped_dates(
    df: &DataFrame,
    mapping: &ColumnMapping,
    field: StandardField,
) -> Result<Vec<Option<NaiveDate>>> {
    let name = mapping.get(field).ok_or(GeoError::FieldNotMapped(field))?;
    let column = df
        .column(name)
        .map_err(|_| GeoError::ColumnNotFound(name.to_string()))?;
    Ok(column_dates(column))
}

/// Computes transit days from the date field to the delivery date field.
///
/// Rows with an unparseable or missing date on either side are counted and
/// left out of the statistics.
///
/// # Errors
///
/// Fails when either date field is unmapped or its column is missing.
pub fn analyze_timeline(df: &DataFrame, mapping: &ColumnMapping) -> Result<TimelineReport> {
    let departures = mapped_dates(df, mapping, StandardField::Date)?;
    let arrivals = mapped_dates(df, mapping, StandardField::DeliveryDate)?;
    let text = |field: StandardField| {
        mapping
            .get(field)
            .and_then(|column| column_strings(df, column))
            .unwrap_or_else(|| vec![None; df.height()])
    };
    let ids = text(StandardField::ShipmentId);
    let statuses = text(StandardField::Status);

    let records: Vec<TransitRecord> = departures
        .iter()
        .zip(&arrivals)
        .enumerate()
        .filter_map(|(row, (departure, arrival))| {
            let (departure, arrival) = ((*departure)?, (*arrival)?);
            Some(TransitRecord {
                row,
                shipment_id: ids[row].clone(),
                departure,
                arrival,
                transit_days: (arrival - departure).num_days(),
                status: statuses[row].clone(),
            })
        })
        .collect();

    let days: Vec<i64> = records.iter().map(|r| r.transit_days).collect();
    let average_days =
        (!days.is_empty()).then(|| days.iter().sum::<i64>() as f64 / days.len() as f64);

    Ok(TimelineReport {
        unparsed_departures: departures.iter().filter(|d| d.is_none()).count(),
        unparsed_arrivals: arrivals.iter().filter(|d| d.is_none()).count(),
        average_days,
        shortest_days: days.iter().copied().min(),
        longest_days: days.iter().copied().max(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ship_common::days_from_date;

    #[test]
    fn test_transit_days_from_text_and_date_columns() {
        let shipped = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let shipped_days: Vec<Option<i32>> = vec![
            Some(days_from_date(shipped)),
            Some(days_from_date(shipped)),
            None,
        ];
        let df = DataFrame::new(vec![
            Series::new("id".into(), vec!["S1", "S2", "S3"]).into_column(),
            Series::new("ship_date".into(), shipped_days)
                .cast(&DataType::Date)
                .unwrap()
                .into_column(),
            Series::new("eta".into(), vec!["2024-01-13", "soon", "2024-01-20"]).into_column(),
        ])
        .unwrap();
        let names: Vec<String> = ["id", "ship_date", "eta"]
            .iter()
            .map(|n| (*n).to_string())
            .collect();
        let mut mapping = ColumnMapping::new();
        mapping.assign(StandardField::ShipmentId, "id", &names).unwrap();
        mapping.assign(StandardField::Date, "ship_date", &names).unwrap();
        mapping
            .assign(StandardField::DeliveryDate, "eta", &names)
            .unwrap();

        let report = analyze_timeline(&df, &mapping).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].transit_days, 3);
        assert_eq!(report.records[0].shipment_id.as_deref(), Some("S1"));
        assert_eq!(report.unparsed_departures, 1);
        assert_eq!(report.unparsed_arrivals, 1);
        assert_eq!(report.average_days, Some(3.0));
    }

    #[test]
    fn test_requires_both_dates() {
        let df = DataFrame::new(vec![
            Series::new("ship_date".into(), vec!["2024-01-01"]).into_column(),
        ])
        .unwrap();
        let names = vec!["ship_date".to_string()];
        let mut mapping = ColumnMapping::new();
        mapping.assign(StandardField::Date, "ship_date", &names).unwrap();
        let err = analyze_timeline(&df, &mapping).unwrap_err();
        assert!(matches!(
            err,
            GeoError::FieldNotMapped(StandardField::DeliveryDate)
        ));
    }
}
