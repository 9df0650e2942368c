//! Address geocoding.
//!
//! Forward geocoding turns typed addresses into coordinates, reverse
//! geocoding names a geolocation fix, and autocomplete offers places while
//! the user types. Backed by the Mapbox Geocoding v5 API.

mod client;
mod error;
mod types;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;

use crate::domain::Coordinate;

pub use client::{GeocoderConfig, MapboxClient};
pub use error::GeocodeError;
pub use types::{Feature, FeatureCollection};

/// A resolved place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Coordinate,
}

/// Address lookup service.
pub trait Geocoder: Send + Sync {
    /// Best match for free text. `NotFound` when nothing matches.
    fn forward<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Place, GeocodeError>>;

    /// Display name for a coordinate.
    fn reverse(&self, at: Coordinate) -> BoxFuture<'_, Result<String, GeocodeError>>;

    /// Autocomplete suggestions for partial input.
    fn suggest<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Place>, GeocodeError>>;
}

impl Geocoder for MapboxClient {
    fn forward<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Place, GeocodeError>> {
        MapboxClient::forward(self, query).boxed()
    }

    fn reverse(&self, at: Coordinate) -> BoxFuture<'_, Result<String, GeocodeError>> {
        MapboxClient::reverse(self, at).boxed()
    }

    fn suggest<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<Place>, GeocodeError>> {
        MapboxClient::suggest(self, query).boxed()
    }
}
