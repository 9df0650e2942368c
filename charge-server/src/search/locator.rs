//! Search orchestration: geocode, fetch stations, open a session.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::{CachedStationSource, StationFetch};
use crate::domain::Coordinate;
use crate::geocode::{Geocoder, Place};

use super::error::LookupError;
use super::session::SearchSession;

/// Resolves user input to a location and loads the stations around it.
#[derive(Clone)]
pub struct Locator {
    geocoder: Arc<dyn Geocoder>,
    stations: Arc<CachedStationSource>,
}

impl Locator {
    pub fn new(geocoder: Arc<dyn Geocoder>, stations: Arc<CachedStationSource>) -> Self {
        Self { geocoder, stations }
    }

    /// Search around a typed address.
    ///
    /// Blank input is `LocationNotFound` without asking the geocoder.
    pub async fn search_text(&self, text: &str) -> Result<SearchSession, LookupError> {
        let place = self.forward(text).await?;
        let fetch = self.stations_at(place.location).await?;

        info!(
            query = text.trim(),
            location = %place.location,
            stations = fetch.stations.len(),
            "search"
        );

        let name = place.name.or_else(|| Some(text.trim().to_string()));
        Ok(SearchSession::new(place.location, name, fetch))
    }

    /// Search around a geolocation fix or map pin.
    ///
    /// The place name is looked up alongside the stations. Failing to name
    /// the place does not fail the search.
    pub async fn search_at(&self, at: Coordinate) -> Result<SearchSession, LookupError> {
        let (fetch, name) = tokio::join!(self.stations_at(at), self.geocoder.reverse(at));
        let fetch = fetch?;

        let name = match name {
            Ok(name) => Some(name),
            Err(e) => {
                warn!(location = %at, "reverse geocoding failed: {e}");
                None
            }
        };

        info!(location = %at, stations = fetch.stations.len(), "search");
        Ok(SearchSession::new(at, name, fetch))
    }

    /// Autocomplete suggestions. Blank input has none.
    pub async fn suggest(&self, text: &str) -> Result<Vec<Place>, LookupError> {
        let query = text.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.geocoder.suggest(query).await?)
    }

    /// Resolve an address to a place.
    pub async fn forward(&self, text: &str) -> Result<Place, LookupError> {
        let query = text.trim();
        if query.is_empty() {
            return Err(LookupError::LocationNotFound);
        }
        Ok(self.geocoder.forward(query).await?)
    }

    /// Name the place at a coordinate.
    pub async fn reverse(&self, at: Coordinate) -> Result<String, LookupError> {
        Ok(self.geocoder.reverse(at).await?)
    }

    /// Stations around a coordinate, possibly from cache.
    pub async fn stations_at(&self, at: Coordinate) -> Result<StationFetch, LookupError> {
        Ok(self.stations.fetch(at).await?)
    }
}
