//! Built-in coordinates for common cities.

use crate::distance::Coordinates;

/// Lowercase city names with known coordinates, checked before any remote lookup.
pub const COMMON_CITIES: &[(&str, Coordinates)] = &[
    ("new york", Coordinates::new(40.7128, -74.0060)),
    ("new york city", Coordinates::new(40.7128, -74.0060)),
    ("nyc", Coordinates::new(40.7128, -74.0060)),
    ("los angeles", Coordinates::new(34.0522, -118.2437)),
    ("chicago", Coordinates::new(41.8781, -87.6298)),
    ("houston", Coordinates::new(29.7604, -95.3698)),
    ("phoenix", Coordinates::new(33.4484, -112.0740)),
    ("philadelphia", Coordinates::new(39.9526, -75.1652)),
    ("san antonio", Coordinates::new(29.4241, -98.4936)),
    ("san diego", Coordinates::new(32.7157, -117.1611)),
    ("dallas", Coordinates::new(32.7767, -96.7970)),
    ("san jose", Coordinates::new(37.3382, -121.8863)),
    ("austin", Coordinates::new(30.2672, -97.7431)),
    ("jacksonville", Coordinates::new(30.3322, -81.6557)),
    ("fort worth", Coordinates::new(32.7555, -97.3308)),
    ("columbus", Coordinates::new(39.9612, -82.9988)),
    ("charlotte", Coordinates::new(35.2271, -80.8431)),
    ("san francisco", Coordinates::new(37.7749, -122.4194)),
    ("indianapolis", Coordinates::new(39.7684, -86.1581)),
    ("seattle", Coordinates::new(47.6062, -122.3321)),
    ("denver", Coordinates::new(39.7392, -104.9903)),
    ("boston", Coordinates::new(42.3601, -71.0589)),
    ("el paso", Coordinates::new(31.7619, -106.4850)),
    ("detroit", Coordinates::new(42.3314, -83.0458)),
    ("nashville", Coordinates::new(36.1627, -86.7816)),
    ("portland", Coordinates::new(45.5152, -122.6784)),
    ("oklahoma city", Coordinates::new(35.4676, -97.5164)),
    ("las vegas", Coordinates::new(36.1699, -115.1398)),
    ("louisville", Coordinates::new(38.2527, -85.7585)),
    ("baltimore", Coordinates::new(39.2904, -76.6122)),
    ("milwaukee", Coordinates::new(43.0389, -87.9065)),
    ("albuquerque", Coordinates::new(35.0844, -106.6504)),
    ("tucson", Coordinates::new(32.2226, -110.9747)),
    ("fresno", Coordinates::new(36.7378, -119.7871)),
    ("mesa", Coordinates::new(33.4152, -111.8315)),
    ("sacramento", Coordinates::new(38.5816, -121.4944)),
    ("atlanta", Coordinates::new(33.7490, -84.3880)),
    ("kansas city", Coordinates::new(39.0997, -94.5786)),
    ("colorado springs", Coordinates::new(38.8339, -104.8214)),
    ("omaha", Coordinates::new(41.2565, -95.9345)),
    ("raleigh", Coordinates::new(35.7796, -78.6382)),
    ("miami", Coordinates::new(25.7617, -80.1918)),
    ("cleveland", Coordinates::new(41.4993, -81.6944)),
    ("tulsa", Coordinates::new(36.1540, -95.9928)),
    ("oakland", Coordinates::new(37.8044, -122.2711)),
    ("minneapolis", Coordinates::new(44.9778, -93.2650)),
    ("wichita", Coordinates::new(37.6872, -97.3301)),
    ("arlington", Coordinates::new(32.7357, -97.1081)),
    ("london", Coordinates::new(51.5074, -0.1278)),
    ("paris", Coordinates::new(48.8566, 2.3522)),
    ("berlin", Coordinates::new(52.5200, 13.4050)),
    ("tokyo", Coordinates::new(35.6762, 139.6503)),
    ("sydney", Coordinates::new(-33.8688, 151.2093)),
    ("toronto", Coordinates::new(43.6532, -79.3832)),
    ("vancouver", Coordinates::new(49.2827, -123.1207)),
    ("montreal", Coordinates::new(45.5017, -73.5673)),
    ("mexico city", Coordinates::new(19.4326, -99.1332)),
    ("madrid", Coordinates::new(40.4168, -3.7038)),
    ("rome", Coordinates::new(41.9028, 12.4964)),
    ("amsterdam", Coordinates::new(52.3676, 4.9041)),
    ("brussels", Coordinates::new(50.8503, 4.3517)),
    ("zurich", Coordinates::new(47.3769, 8.5417)),
    ("vienna", Coordinates::new(48.2082, 16.3738)),
    ("stockholm", Coordinates::new(59.3293, 18.0686)),
    ("copenhagen", Coordinates::new(55.6761, 12.5683)),
    ("oslo", Coordinates::new(59.9139, 10.7522)),
    ("dublin", Coordinates::new(53.3498, -6.2603)),
    ("singapore", Coordinates::new(1.3521, 103.8198)),
    ("hong kong", Coordinates::new(22.3193, 114.1694)),
    ("shanghai", Coordinates::new(31.2304, 121.4737)),
    ("beijing", Coordinates::new(39.9042, 116.4074)),
    ("mumbai", Coordinates::new(19.0760, 72.8777)),
    ("delhi", Coordinates::new(28.7041, 77.1025)),
    ("bangalore", Coordinates::new(12.9716, 77.5946)),
    ("seoul", Coordinates::new(37.5665, 126.9780)),
    ("bangkok", Coordinates::new(13.7563, 100.5018)),
    ("jakarta", Coordinates::new(-6.2088, 106.8456)),
    ("manila", Coordinates::new(14.5995, 120.9842)),
    ("kuala lumpur", Coordinates::new(3.1390, 101.6869)),
    ("dubai", Coordinates::new(25.2048, 55.2708)),
    ("istanbul", Coordinates::new(41.0082, 28.9784)),
    ("cairo", Coordinates::new(30.0444, 31.2357)),
    ("lagos", Coordinates::new(6.5244, 3.3792)),
    ("johannesburg", Coordinates::new(-26.2041, 28.0473)),
    ("cape town", Coordinates::new(-33.9249, 18.4241)),
    ("sao paulo", Coordinates::new(-23.5558, -46.6396)),
    ("rio de janeiro", Coordinates::new(-22.9068, -43.1729)),
    ("buenos aires", Coordinates::new(-34.6037, -58.3816)),
    ("lima", Coordinates::new(-12.0464, -77.0428)),
    ("bogota", Coordinates::new(4.7110, -74.0721)),
    ("santiago", Coordinates::new(-33.4489, -70.6693)),
];

/// Country suffixes dropped before lookup.
const COUNTRY_SUFFIXES: &[&str] = &[", usa", ", us", ", united states", ", uk", ", canada"];

/// Short forms expanded before lookup.
const CITY_ALIASES: &[(&str, &str)] = &[
    ("ny", "new york"),
    ("la", "los angeles"),
    ("sf", "san francisco"),
    ("dc", "washington"),
    ("philly", "philadelphia"),
];

/// Normalizes a city name for lookup: trimmed, lowercased, country suffix
/// removed and short forms expanded.
///
/// # Examples
///
/// ```
/// use ship_geo::clean_city_name;
///
/// assert_eq!(clean_city_name("  Chicago, USA "), "chicago");
/// assert_eq!(clean_city_name("SF"), "san francisco");
/// ```
pub fn clean_city_name(city: &str) -> String {
    let mut cleaned = city.trim().to_lowercase();
    if let Some(suffix) = COUNTRY_SUFFIXES
        .iter()
        .find(|suffix| cleaned.ends_with(*suffix))
    {
        cleaned.truncate(cleaned.len() - suffix.len());
        cleaned = cleaned.trim_end().to_string();
    }
    CITY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == cleaned)
        .map_or(cleaned, |(_, full)| (*full).to_string())
}

/// Looks up a city in [`COMMON_CITIES`] after cleaning its name.
pub fn known_city(city: &str) -> Option<Coordinates> {
    let cleaned = clean_city_name(city);
    COMMON_CITIES
        .iter()
        .find(|(name, _)| *name == cleaned)
        .map(|(_, coordinates)| *coordinates)
}
