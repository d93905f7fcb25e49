//! DataFrame cleaning driven by the column mapping.

use polars::prelude::*;
use ship_common::{
    any_to_f64, any_to_string_non_empty, column_text, days_from_date, is_numeric_dtype,
};
use ship_model::{ColumnMapping, StandardField};
use tracing::debug;

use crate::error::{NormalizationError, Result};
use crate::values::{clean_status, clean_title, parse_amount, parse_date};

/// Cleans every mapped column according to its field.
///
/// - carrier, origin, destination: trimmed and title-cased
/// - status: trimmed and lowercased
/// - weight, cost: `Float64`, unparseable values become null
/// - date, delivery_date: `Date`, unparseable values become null
///
/// Shipment ID and priority columns are left untouched, as are columns the
/// mapping does not mention. Blank text becomes null. Cleaning is
/// idempotent.
///
/// # Errors
///
/// Fails when a mapped column is missing from `df`.
pub fn clean(df: &DataFrame, mapping: &ColumnMapping) -> Result<DataFrame> {
    let mut cleaned = df.clone();
    for (field, column_name) in mapping.iter() {
        let column = df
            .column(column_name)
            .map_err(|_| NormalizationError::ColumnNotFound {
                field,
                column: column_name.to_string(),
            })?;
        let Some(replacement) = clean_column(field, column)? else {
            continue;
        };
        let nulls_before = column.null_count();
        let nulls_after = replacement.null_count();
        debug!(
            field = %field,
            column = %column_name,
            nulls_added = nulls_after.saturating_sub(nulls_before),
            "Cleaned column"
        );
        cleaned.with_column(replacement)?;
    }
    Ok(cleaned)
}

/// Cleans one column for `field`, or returns `None` when the field is kept as is.
fn clean_column(field: StandardField, column: &Column) -> Result<Option<Series>> {
    let name = column.name().clone();
    let series = match field {
        StandardField::Carrier | StandardField::Origin | StandardField::Destination => {
            let values: Vec<Option<String>> = column_text(column)
                .into_iter()
                .map(|value| value.as_deref().and_then(clean_title))
                .collect();
            Series::new(name, values)
        }
        StandardField::Status => {
            let values: Vec<Option<String>> = column_text(column)
                .into_iter()
                .map(|value| value.as_deref().and_then(clean_status))
                .collect();
            Series::new(name, values)
        }
        StandardField::Weight | StandardField::Cost => Series::new(name, number_values(column)),
        StandardField::Date | StandardField::DeliveryDate => {
            if column.dtype() == &DataType::Date {
                return Ok(None);
            }
            let days: Vec<Option<i32>> = column_text(column)
                .into_iter()
                .map(|value| value.as_deref().and_then(parse_date).map(days_from_date))
                .collect();
            Series::new(name, days).cast(&DataType::Date)?
        }
        StandardField::ShipmentId | StandardField::Priority => return Ok(None),
    };
    Ok(Some(series))
}

fn number_values(column: &Column) -> Vec<Option<f64>> {
    let numeric = is_numeric_dtype(column.dtype());
    (0..column.len())
        .map(|idx| match column.get(idx) {
            Ok(value) if numeric => any_to_f64(value),
            Ok(value) => any_to_string_non_empty(value)
                .as_deref()
                .and_then(parse_amount),
            Err(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ship_common::column_strings;

    fn manifest() -> (DataFrame, ColumnMapping) {
        let df = DataFrame::new(vec![
            Series::new("id".into(), vec!["S1", "S2", "S3"]).into_column(),
            Series::new("carrier".into(), vec![Some(" fedex "), Some(""), None]).into_column(),
            Series::new("status".into(), vec!["Delivered ", "DELAYED", "in transit"])
                .into_column(),
            Series::new("cost".into(), vec!["$1,200.50", "abc", "30"]).into_column(),
            Series::new("ship_date".into(), vec!["2024-01-15", "01/16/2024", "never"])
                .into_column(),
        ])
        .unwrap();
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let mut mapping = ColumnMapping::new();
        mapping
            .assign(StandardField::ShipmentId, "id", &columns)
            .unwrap();
        mapping
            .assign(StandardField::Carrier, "carrier", &columns)
            .unwrap();
        mapping
            .assign(StandardField::Status, "status", &columns)
            .unwrap();
        mapping.assign(StandardField::Cost, "cost", &columns).unwrap();
        mapping
            .assign(StandardField::Date, "ship_date", &columns)
            .unwrap();
        (df, mapping)
    }

    #[test]
    fn test_clean_text_fields() {
        let (df, mapping) = manifest();
        let cleaned = clean(&df, &mapping).unwrap();
        assert_eq!(
            column_strings(&cleaned, "carrier").unwrap(),
            vec![Some("Fedex".to_string()), None, None]
        );
        assert_eq!(
            column_strings(&cleaned, "status").unwrap(),
            vec![
                Some("delivered".to_string()),
                Some("delayed".to_string()),
                Some("in transit".to_string())
            ]
        );
    }

    #[test]
    fn test_clean_numeric_and_date_fields() {
        let (df, mapping) = manifest();
        let cleaned = clean(&df, &mapping).unwrap();

        let cost = cleaned.column("cost").unwrap();
        assert_eq!(cost.dtype(), &DataType::Float64);
        assert_eq!(cost.null_count(), 1);
        assert_eq!(cost.get(0).unwrap(), AnyValue::Float64(1200.5));

        let dates = cleaned.column("ship_date").unwrap();
        assert_eq!(dates.dtype(), &DataType::Date);
        let expected = days_from_date(NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
        assert_eq!(dates.get(1).unwrap(), AnyValue::Date(expected));
        assert_eq!(dates.null_count(), 1);
    }

    #[test]
    fn test_nan_in_float_column_becomes_null() {
        let df = DataFrame::new(vec![
            Series::new("cost".into(), vec![25.5, f64::NAN, 45.2]).into_column(),
        ])
        .unwrap();
        let columns = vec!["cost".to_string()];
        let mut mapping = ColumnMapping::new();
        mapping.assign(StandardField::Cost, "cost", &columns).unwrap();

        let cleaned = clean(&df, &mapping).unwrap();
        let cost = cleaned.column("cost").unwrap();
        assert_eq!(cost.null_count(), 1);
        assert_eq!(cost.get(1).unwrap(), AnyValue::Null);
        assert_eq!(cost.get(2).unwrap(), AnyValue::Float64(45.2));
    }

    #[test]
    fn test_shipment_id_untouched() {
        let (df, mapping) = manifest();
        let cleaned = clean(&df, &mapping).unwrap();
        let before = df.column("id").unwrap().as_materialized_series();
        let after = cleaned.column("id").unwrap().as_materialized_series();
        assert!(after.equals(before));
    }

    #[test]
    fn test_clean_is_idempotent() {
        let (df, mapping) = manifest();
        let once = clean(&df, &mapping).unwrap();
        let twice = clean(&once, &mapping).unwrap();
        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn test_missing_mapped_column_is_error() {
        let (df, _) = manifest();
        let columns = vec!["weight".to_string()];
        let mut mapping = ColumnMapping::new();
        mapping
            .assign(StandardField::Weight, "weight", &columns)
            .unwrap();
        let err = clean(&df, &mapping).unwrap_err();
        assert!(matches!(
            err,
            NormalizationError::ColumnNotFound {
                field: StandardField::Weight,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_mapping_returns_same_frame() {
        let (df, _) = manifest();
        let cleaned = clean(&df, &ColumnMapping::new()).unwrap();
        assert!(cleaned.equals_missing(&df));
    }
}
