//! Route distance and cost-efficiency analytics.

use std::collections::HashMap;

use polars::prelude::*;
use ship_common::{column_numbers, column_strings};
use ship_model::{ColumnMapping, StandardField};

use crate::enrich::coordinate_pairs;
use crate::error::Result;

pub const DISTANCE_COLUMN: &str = "Distance (mi)";
pub const COST_PER_MILE_COLUMN: &str = "Cost Per Mile";

/// One shipment with both coordinate pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Zero-based row in the manifest.
    pub row: usize,
    pub shipment_id: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub carrier: Option<String>,
    pub distance_miles: f64,
    pub cost: Option<f64>,
    pub cost_per_mile: Option<f64>,
}

impl Route {
    /// `Origin -> Destination`, with `Unknown` for missing names.
    pub fn label(&self) -> String {
        format!(
            "{} -> {}",
            self.origin.as_deref().unwrap_or("Unknown"),
            self.destination.as_deref().unwrap_or("Unknown")
        )
    }
}

/// Aggregates for one carrier.
#[derive(Debug, Clone, PartialEq)]
pub struct CarrierRouteStats {
    pub carrier: String,
    pub shipments: usize,
    pub total_distance: f64,
    pub total_cost: f64,
    /// Total cost over total distance, when both are known.
    pub cost_per_mile: Option<f64>,
}

/// Route analytics over every row with coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteReport {
    pub routes: Vec<Route>,
    /// Rows skipped for missing coordinates.
    pub skipped_rows: usize,
    pub total_distance: f64,
    pub average_distance: f64,
    pub total_cost: Option<f64>,
    pub average_cost_per_mile: Option<f64>,
    pub longest: Option<Route>,
    pub shortest: Option<Route>,
    pub most_efficient: Option<Route>,
    pub least_efficient: Option<Route>,
    /// Sorted by descending shipment count, then carrier name.
    pub carriers: Vec<CarrierRouteStats>,
}

/// Rounds to four decimal places.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Cost over distance, or `None` for zero-length routes.
fn cost_per_mile(cost: Option<f64>, distance: f64) -> Option<f64> {
    let cost = cost?;
    (distance > 0.0).then(|| round4(cost / distance))
}

fn mapped_text(df: &DataFrame, mapping: &ColumnMapping, field: StandardField) -> Vec<Option<String>> {
    mapping
        .get(field)
        .and_then(|column| column_strings(df, column))
        .unwrap_or_else(|| vec![None; df.height()])
}

fn mapped_cost(df: &DataFrame, mapping: &ColumnMapping) -> Option<Vec<Option<f64>>> {
    mapping
        .get(StandardField::Cost)
        .and_then(|column| column_numbers(df, column))
}

/// Appends `Distance (mi)` and, when a numeric cost column is mapped,
/// `Cost Per Mile` rounded to four decimals.
///
/// # Errors
///
/// Fails when the coordinate columns are missing.
pub fn add_route_columns(df: &DataFrame, mapping: &ColumnMapping) -> Result<DataFrame> {
    let pairs = coordinate_pairs(df)?;
    let distances: Vec<Option<f64>> = pairs
        .iter()
        .map(|(origin, dest)| Some(origin.as_ref()?.miles_to(*dest.as_ref()?)))
        .collect();

    let mut out = df.clone();
    if let Some(costs) = mapped_cost(df, mapping) {
        let per_mile: Vec<Option<f64>> = distances
            .iter()
            .zip(&costs)
            .map(|(distance, cost)| cost_per_mile(*cost, (*distance)?))
            .collect();
        out.with_column(Series::new(DISTANCE_COLUMN.into(), distances))?;
        out.with_column(Series::new(COST_PER_MILE_COLUMN.into(), per_mile))?;
    } else {
        out.with_column(Series::new(DISTANCE_COLUMN.into(), distances))?;
    }
    Ok(out)
}

/// Builds route analytics for rows that have both coordinate pairs.
///
/// # Errors
///
/// Fails when the coordinate columns are missing.
pub fn analyze_routes(df: &DataFrame, mapping: &ColumnMapping) -> Result<RouteReport> {
    let pairs = coordinate_pairs(df)?;
    let ids = mapped_text(df, mapping, StandardField::ShipmentId);
    let origins = mapped_text(df, mapping, StandardField::Origin);
    let destinations = mapped_text(df, mapping, StandardField::Destination);
    let carriers = mapped_text(df, mapping, StandardField::Carrier);
    let costs = mapped_cost(df, mapping);

    let routes: Vec<Route> = pairs
        .iter()
        .enumerate()
        .filter_map(|(row, (origin, dest))| {
            let distance_miles = origin.as_ref()?.miles_to(*dest.as_ref()?);
            let cost = costs.as_ref().and_then(|costs| costs[row]);
            Some(Route {
                row,
                shipment_id: ids[row].clone(),
                origin: origins[row].clone(),
                destination: destinations[row].clone(),
                carrier: carriers[row].clone(),
                distance_miles,
                cost,
                cost_per_mile: cost_per_mile(cost, distance_miles),
            })
        })
        .collect();

    let total_distance: f64 = routes.iter().map(|r| r.distance_miles).sum();
    let average_distance = if routes.is_empty() {
        0.0
    } else {
        total_distance / routes.len() as f64
    };
    let total_cost = costs
        .as_ref()
        .map(|costs| costs.iter().flatten().sum::<f64>());
    let average_cost_per_mile = total_cost
        .filter(|_| total_distance > 0.0)
        .map(|cost| cost / total_distance);

    let by = |key: fn(&Route) -> Option<f64>, want_max: bool| -> Option<Route> {
        let mut best: Option<(&Route, f64)> = None;
        for route in &routes {
            let Some(value) = key(route) else { continue };
            let better = match best {
                None => true,
                Some((_, current)) if want_max => value > current,
                Some((_, current)) => value < current,
            };
            if better {
                best = Some((route, value));
            }
        }
        best.map(|(route, _)| route.clone())
    };

    let report = RouteReport {
        skipped_rows: df.height() - routes.len(),
        total_distance,
        average_distance,
        total_cost,
        average_cost_per_mile,
        longest: by(|r| Some(r.distance_miles), true),
        shortest: by(|r| Some(r.distance_miles), false),
        most_efficient: by(|r| r.cost_per_mile, false),
        least_efficient: by(|r| r.cost_per_mile, true),
        carriers: carrier_stats(&routes),
        routes,
    };
    Ok(report)
}

fn carrier_stats(routes: &[Route]) -> Vec<CarrierRouteStats> {
    let mut stats: HashMap<&str, CarrierRouteStats> = HashMap::new();
    for route in routes {
        let name = route.carrier.as_deref().unwrap_or("Unknown");
        let entry = stats.entry(name).or_insert_with(|| CarrierRouteStats {
            carrier: name.to_string(),
            shipments: 0,
            total_distance: 0.0,
            total_cost: 0.0,
            cost_per_mile: None,
        });
        entry.shipments += 1;
        entry.total_distance += route.distance_miles;
        entry.total_cost += route.cost.unwrap_or(0.0);
    }
    let has_cost = routes.iter().any(|route| route.cost.is_some());
    let mut stats: Vec<CarrierRouteStats> = stats
        .into_values()
        .map(|mut entry| {
            if has_cost && entry.total_distance > 0.0 {
                entry.cost_per_mile = Some(round4(entry.total_cost / entry.total_distance));
            }
            entry
        })
        .collect();
    stats.sort_by(|a, b| {
        b.shipments
            .cmp(&a.shipments)
            .then_with(|| a.carrier.cmp(&b.carrier))
    });
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_per_mile_rounding_and_zero_distance() {
        assert_eq!(cost_per_mile(Some(10.0), 3.0), Some(3.3333));
        assert_eq!(cost_per_mile(Some(10.0), 0.0), None);
        assert_eq!(cost_per_mile(None, 5.0), None);
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.123_456), 0.1235);
    }
}
