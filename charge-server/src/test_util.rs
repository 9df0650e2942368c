//! Test fixtures and in-memory collaborators.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::cache::{CacheConfig, CachedStationSource};
use crate::domain::{Coordinate, Station, StationDetails, StationId};
use crate::geocode::{GeocodeError, Geocoder, Place};
use crate::search::Locator;
use crate::stations::MockStationSource;

pub fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

pub fn philadelphia() -> Coordinate {
    coord(39.9526, -75.1652)
}

fn named(id: i64, location: Option<Coordinate>, category: &str, name: &str) -> Station {
    Station::new(StationId::Numeric(id), location)
        .with_category(category)
        .with_details(StationDetails {
            name: Some(name.to_string()),
            ..StationDetails::default()
        })
}

/// Four stations around Philadelphia:
/// Alpha in the centre, Bravo about 7 km away, Charlie in Pittsburgh and
/// Delta with no position.
pub fn stations() -> Vec<Station> {
    vec![
        named(1, Some(philadelphia()), "Public", "Alpha"),
        named(2, Some(coord(40.0, -75.2)), "Private", "Bravo"),
        named(3, Some(coord(40.4406, -79.9959)), "Public", "Charlie"),
        named(4, None, "Public", "Delta"),
    ]
}

/// Geocoder answering from a fixed table of places.
#[derive(Default)]
pub struct FakeGeocoder {
    places: BTreeMap<String, Place>,
    reverse_name: Option<String>,
    offline: bool,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, query: &str, location: Coordinate) -> Self {
        self.places.insert(
            query.to_lowercase(),
            Place {
                id: Some(format!("place.{}", self.places.len())),
                name: Some(query.to_string()),
                location,
            },
        );
        self
    }

    pub fn with_reverse_name(mut self, name: &str) -> Self {
        self.reverse_name = Some(name.to_string());
        self
    }

    /// Fail every call as if the service were unreachable.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    fn unavailable() -> GeocodeError {
        GeocodeError::Api {
            status: 503,
            message: "unavailable".into(),
        }
    }
}

impl Geocoder for FakeGeocoder {
    fn forward<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Place, GeocodeError>> {
        async move {
            if self.offline {
                return Err(Self::unavailable());
            }
            self.places
                .get(&query.to_lowercase())
                .cloned()
                .ok_or_else(|| GeocodeError::NotFound {
                    query: query.to_string(),
                })
        }
        .boxed()
    }

    fn reverse(&self, at: Coordinate) -> BoxFuture<'_, Result<String, GeocodeError>> {
        async move {
            if self.offline {
                return Err(Self::unavailable());
            }
            self.reverse_name.clone().ok_or(GeocodeError::NotFound {
                query: at.to_string(),
            })
        }
        .boxed()
    }

    fn suggest<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Place>, GeocodeError>> {
        async move {
            if self.offline {
                return Err(Self::unavailable());
            }
            let prefix = query.to_lowercase();
            Ok(self
                .places
                .iter()
                .filter(|(key, _)| key.starts_with(&prefix))
                .map(|(_, place)| place.clone())
                .collect())
        }
        .boxed()
    }
}

/// A locator over `geocoder` and a fixed station list.
pub fn locator(geocoder: FakeGeocoder, stations: Vec<Station>) -> Locator {
    let source = Arc::new(MockStationSource::from_stations(stations));
    let cached = CachedStationSource::new(source, &CacheConfig::default());
    Locator::new(Arc::new(geocoder), Arc::new(cached))
}
