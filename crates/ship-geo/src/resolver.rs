//! City coordinate resolution with caching and a request throttle.

use std::collections::HashMap;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::cities::{clean_city_name, known_city};
use crate::distance::Coordinates;
use crate::geocoder::Geocoder;

/// Where a resolved coordinate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The built-in city table.
    Known,
    /// The remote geocoder.
    Remote,
    /// Neither source knows the city.
    Unresolved,
}

/// Resolves city names, remembering every answer for the session.
///
/// Remote requests are spaced at least `min_interval` apart.
pub struct CoordinateResolver<G> {
    geocoder: Option<G>,
    min_interval: Duration,
    last_request: Option<Instant>,
    cache: HashMap<String, Option<Coordinates>>,
}

impl<G: Geocoder> CoordinateResolver<G> {
    pub fn new(geocoder: G, min_interval: Duration) -> Self {
        Self {
            geocoder: Some(geocoder),
            min_interval,
            last_request: None,
            cache: HashMap::new(),
        }
    }

    /// A resolver that only consults the built-in city table.
    pub fn offline() -> Self {
        Self {
            geocoder: None,
            min_interval: Duration::ZERO,
            last_request: None,
            cache: HashMap::new(),
        }
    }

    /// Resolves `city`, or returns `None` when no source knows it.
    pub fn resolve(&mut self, city: &str) -> Option<Coordinates> {
        self.resolve_with_source(city).0
    }

    /// Resolves `city` and reports which source answered.
    ///
    /// A city answered from the session cache reports the source that
    /// originally answered it.
    pub fn resolve_with_source(&mut self, city: &str) -> (Option<Coordinates>, Resolution) {
        let cleaned = clean_city_name(city);
        if cleaned.is_empty() {
            return (None, Resolution::Unresolved);
        }
        if let Some(coordinates) = known_city(&cleaned) {
            return (Some(coordinates), Resolution::Known);
        }
        if let Some(cached) = self.cache.get(&cleaned) {
            debug!(city = %cleaned, "Coordinates served from session cache");
            return match cached {
                Some(coordinates) => (Some(*coordinates), Resolution::Remote),
                None => (None, Resolution::Unresolved),
            };
        }

        let remote = self.lookup_remote(&cleaned);
        self.cache.insert(cleaned, remote);
        match remote {
            Some(coordinates) => (Some(coordinates), Resolution::Remote),
            None => (None, Resolution::Unresolved),
        }
    }

    fn lookup_remote(&mut self, cleaned: &str) -> Option<Coordinates> {
        let geocoder = self.geocoder.as_ref()?;
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                thread::sleep(self.min_interval - elapsed);
            }
        }
        let result = geocoder.geocode(cleaned);
        self.last_request = Some(Instant::now());
        match result {
            Ok(Some(coordinates)) => Some(coordinates),
            Ok(None) => {
                warn!(city = %cleaned, "Geocoder found no match");
                None
            }
            Err(e) => {
                warn!(city = %cleaned, error = %e, "Geocoding failed");
                None
            }
        }
    }

    /// Number of cities remembered from remote lookups.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}
