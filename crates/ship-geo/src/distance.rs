//! Great-circle distance.

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine distance to `other` in miles.
    pub fn miles_to(self, other: Coordinates) -> f64 {
        haversine(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Haversine distance in miles between two points given in degrees.
///
/// # Examples
///
/// ```
/// use ship_geo::haversine;
///
/// let london_to_manchester = haversine(51.5074, -0.1278, 53.4808, -2.2426);
/// assert!((london_to_manchester - 163.0).abs() < 5.0);
/// ```
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_MILES * a.sqrt().asin()
}
