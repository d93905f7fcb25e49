//! Geographic enrichment and shipment analytics.
//!
//! - `distance`: haversine great-circle distance in miles
//! - `cities` / `resolver` / `geocoder`: city name to coordinates, built-in
//!   table first, then a throttled remote geocoder
//! - `enrich`: coordinate columns for origins and destinations
//! - `routes`: per-route distance and cost per mile
//! - `timeline`: transit days between ship and delivery dates

mod cities;
mod distance;
mod enrich;
mod error;
mod geocoder;
mod resolver;
mod routes;
mod timeline;

pub use cities::{COMMON_CITIES, clean_city_name, known_city};
pub use distance::{Coordinates, EARTH_RADIUS_MILES, haversine};
pub use enrich::{
    COORDINATE_COLUMNS, DEST_LAT, DEST_LON, GeocodeSummary, ORIGIN_LAT, ORIGIN_LON,
    add_coordinates, validate_geographic_data,
};
pub use error::{GeoError, Result};
pub use geocoder::{
    DEFAULT_USER_AGENT, Geocoder, GeocoderSettings, NOMINATIM_ENDPOINT, NominatimClient,
};
pub use resolver::{CoordinateResolver, Resolution};
pub use routes::{
    COST_PER_MILE_COLUMN, CarrierRouteStats, DISTANCE_COLUMN, Route, RouteReport,
    add_route_columns, analyze_routes,
};
pub use timeline::{TimelineReport, TransitRecord, analyze_timeline};
