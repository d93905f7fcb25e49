//! Remote geocoding.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distance::Coordinates;
use crate::error::{GeoError, Result};

/// Public Nominatim search endpoint.
pub const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// Identifies this client to the geocoding service, which requires one.
pub const DEFAULT_USER_AGENT: &str = concat!("ship-insight/", env!("CARGO_PKG_VERSION"));

/// Resolves a place name to coordinates.
pub trait Geocoder {
    /// Returns `Ok(None)` when the service knows no such place.
    fn geocode(&self, place: &str) -> Result<Option<Coordinates>>;
}

/// Geocoding client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderSettings {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Minimum delay between remote requests.
    pub min_interval_ms: u64,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            endpoint: NOMINATIM_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            min_interval_ms: 1000,
        }
    }
}

/// Blocking client for a Nominatim-compatible search API.
pub struct NominatimClient {
    client: Client,
    endpoint: String,
    user_agent: String,
}

impl NominatimClient {
    pub fn new(settings: &GeocoderSettings) -> Result<Self> {
        Url::parse(&settings.endpoint).map_err(|e| GeoError::InvalidEndpoint {
            endpoint: settings.endpoint.clone(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            user_agent: settings.user_agent.clone(),
        })
    }

    fn search_url(&self, place: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("q", place),
                ("format", "json"),
                ("limit", "1"),
                ("addressdetails", "1"),
            ],
        )
        .map_err(|e| GeoError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })
    }
}

#[derive(Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl Geocoder for NominatimClient {
    fn geocode(&self, place: &str) -> Result<Option<Coordinates>> {
        let url = self.search_url(place)?;
        debug!(place, "Requesting coordinates");
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()?;

        if !response.status().is_success() {
            return Err(GeoError::Status(response.status().as_u16()));
        }

        let places: Vec<Place> = response.json()?;
        places.first().map(parse_place).transpose()
    }
}

fn parse_place(place: &Place) -> Result<Coordinates> {
    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| GeoError::InvalidCoordinate(value.to_string()))
    };
    Ok(Coordinates::new(parse(&place.lat)?, parse(&place.lon)?))
}
