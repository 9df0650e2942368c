//! Charging station sources.
//!
//! Stations come from the Open Charge Map `/poi` endpoint, or from a saved
//! response file when running offline.

mod client;
mod convert;
mod error;
mod mock;
mod types;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::domain::{Coordinate, Station};

pub use client::{OcmClient, OcmConfig};
pub use convert::{ConversionError, convert_poi, convert_pois};
pub use error::StationError;
pub use mock::MockStationSource;
pub use types::PoiDto;

/// Something that can list the charging stations around a point.
pub trait StationSource: Send + Sync {
    fn fetch_stations(&self, at: Coordinate) -> BoxFuture<'_, Result<Vec<Station>, StationError>>;
}

impl StationSource for OcmClient {
    fn fetch_stations(&self, at: Coordinate) -> BoxFuture<'_, Result<Vec<Station>, StationError>> {
        OcmClient::fetch_stations(self, at).boxed()
    }
}

impl StationSource for MockStationSource {
    fn fetch_stations(&self, _at: Coordinate) -> BoxFuture<'_, Result<Vec<Station>, StationError>> {
        async move { Ok(self.stations().await) }.boxed()
    }
}
