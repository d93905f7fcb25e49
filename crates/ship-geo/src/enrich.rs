//! Adds coordinate columns for origins and destinations.

use std::collections::HashMap;

use polars::prelude::*;
use ship_common::column_strings;
use ship_model::{ColumnMapping, StandardField};
use tracing::info;

use crate::distance::Coordinates;
use crate::error::{GeoError, Result};
use crate::geocoder::Geocoder;
use crate::resolver::{CoordinateResolver, Resolution};

pub const ORIGIN_LAT: &str = "Origin Lat";
pub const ORIGIN_LON: &str = "Origin Lon";
pub const DEST_LAT: &str = "Dest Lat";
pub const DEST_LON: &str = "Dest Lon";

/// Coordinate columns, in the order they are appended.
pub const COORDINATE_COLUMNS: [&str; 4] = [ORIGIN_LAT, ORIGIN_LON, DEST_LAT, DEST_LON];

/// Share of rows that must have both coordinate pairs for route analysis.
const MIN_GEOCODED_SHARE: f64 = 0.5;

/// Outcome of a geocoding pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeocodeSummary {
    pub rows: usize,
    pub origins_resolved: usize,
    pub destinations_resolved: usize,
    pub unique_cities: usize,
    pub from_table: usize,
    pub from_remote: usize,
    /// Cities no source could resolve, in first-seen order.
    pub unresolved: Vec<String>,
}

impl GeocodeSummary {
    /// One-line report, e.g. `Geocoded 5/6 origins and 6/6 destinations`.
    pub fn describe(&self) -> String {
        format!(
            "Geocoded {}/{} origins and {}/{} destinations",
            self.origins_resolved, self.rows, self.destinations_resolved, self.rows
        )
    }
}

/// Appends `Origin Lat`, `Origin Lon`, `Dest Lat` and `Dest Lon` columns.
///
/// Every distinct city is resolved once. Rows whose city cannot be resolved
/// get nulls.
///
/// # Errors
///
/// Fails when origin or destination is unmapped or its column is missing.
pub fn add_coordinates<G: Geocoder>(
    df: &DataFrame,
    mapping: &ColumnMapping,
    resolver: &mut CoordinateResolver<G>,
) -> Result<(DataFrame, GeocodeSummary)> {
    let origins = mapped_text(df, mapping, StandardField::Origin)?;
    let destinations = mapped_text(df, mapping, StandardField::Destination)?;

    let mut resolved: HashMap<&str, Option<Coordinates>> = HashMap::new();
    let mut summary = GeocodeSummary {
        rows: df.height(),
        ..GeocodeSummary::default()
    };
    for city in origins.iter().chain(destinations.iter()).flatten() {
        if city.trim().is_empty() || resolved.contains_key(city.as_str()) {
            continue;
        }
        let (coordinates, source) = resolver.resolve_with_source(city);
        match source {
            Resolution::Known => summary.from_table += 1,
            Resolution::Remote => summary.from_remote += 1,
            Resolution::Unresolved => summary.unresolved.push(city.clone()),
        }
        resolved.insert(city.as_str(), coordinates);
    }
    summary.unique_cities = resolved.len();

    let lookup = |values: &[Option<String>]| -> Vec<Option<Coordinates>> {
        values
            .iter()
            .map(|city| {
                city.as_deref()
                    .and_then(|city| resolved.get(city).copied().flatten())
            })
            .collect()
    };
    let origin_points = lookup(&origins);
    let destination_points = lookup(&destinations);
    summary.origins_resolved = origin_points.iter().flatten().count();
    summary.destinations_resolved = destination_points.iter().flatten().count();

    let mut enriched = df.clone();
    for (name, points, pick) in [
        (ORIGIN_LAT, &origin_points, latitude as fn(&Coordinates) -> f64),
        (ORIGIN_LON, &origin_points, longitude),
        (DEST_LAT, &destination_points, latitude),
        (DEST_LON, &destination_points, longitude),
    ] {
        let values: Vec<Option<f64>> = points.iter().map(|p| p.as_ref().map(pick)).collect();
        enriched.with_column(Series::new(name.into(), values))?;
    }

    info!(
        rows = summary.rows,
        unique_cities = summary.unique_cities,
        from_table = summary.from_table,
        from_remote = summary.from_remote,
        unresolved = summary.unresolved.len(),
        "Geocoding complete"
    );
    Ok((enriched, summary))
}

fn latitude(point: &Coordinates) -> f64 {
    point.lat
}

fn longitude(point: &Coordinates) -> f64 {
    point.lon
}

fn mapped_text(
    df: &DataFrame,
    mapping: &ColumnMapping,
    field: StandardField,
) -> Result<Vec<Option<String>>> {
    let column = mapping.get(field).ok_or(GeoError::FieldNotMapped(field))?;
    column_strings(df, column).ok_or_else(|| GeoError::ColumnNotFound(column.to_string()))
}

/// Reads the origin and destination coordinate pairs of every row.
///
/// A pair is `None` when either component is null.
pub(crate) fn coordinate_pairs(
    df: &DataFrame,
) -> Result<Vec<(Option<Coordinates>, Option<Coordinates>)>> {
    let mut columns = Vec::with_capacity(COORDINATE_COLUMNS.len());
    for name in COORDINATE_COLUMNS {
        let values = ship_common::column_numbers(df, name)
            .ok_or_else(|| GeoError::ColumnNotFound(name.to_string()))?;
        columns.push(values);
    }
    let pair = |lat: Option<f64>, lon: Option<f64>| Some(Coordinates::new(lat?, lon?));
    Ok((0..df.height())
        .map(|row| {
            (
                pair(columns[0][row], columns[1][row]),
                pair(columns[2][row], columns[3][row]),
            )
        })
        .collect())
}

/// True when the coordinate columns exist and at least half of the rows have
/// both an origin and a destination pair. An empty manifest is never valid.
pub fn validate_geographic_data(df: &DataFrame) -> bool {
    if df.height() == 0 {
        return false;
    }
    let Ok(pairs) = coordinate_pairs(df) else {
        return false;
    };
    let threshold = df.height() as f64 * MIN_GEOCODED_SHARE;
    let origins = pairs.iter().filter(|(origin, _)| origin.is_some()).count();
    let destinations = pairs.iter().filter(|(_, dest)| dest.is_some()).count();
    origins as f64 >= threshold && destinations as f64 >= threshold
}
