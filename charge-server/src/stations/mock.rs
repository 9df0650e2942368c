//! Fixture-backed station source for running without an API key.
//!
//! Loads a saved Open Charge Map `/poi` response and serves it for every
//! location.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::domain::Station;

use super::convert::convert_pois;
use super::error::StationError;
use super::types::PoiDto;

/// Station source that serves a fixed set of stations.
#[derive(Clone)]
pub struct MockStationSource {
    stations: Arc<RwLock<Vec<Station>>>,
    path: Option<PathBuf>,
}

impl MockStationSource {
    /// Load stations from a JSON file in Open Charge Map `/poi` format.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StationError> {
        let path = path.as_ref();
        let stations = load(path)?;
        info!(path = %path.display(), count = stations.len(), "loaded station fixture");

        Ok(Self {
            stations: Arc::new(RwLock::new(stations)),
            path: Some(path.to_path_buf()),
        })
    }

    /// Serve the given stations.
    pub fn from_stations(stations: Vec<Station>) -> Self {
        Self {
            stations: Arc::new(RwLock::new(stations)),
            path: None,
        }
    }

    /// All stations, regardless of location.
    pub async fn stations(&self) -> Vec<Station> {
        self.stations.read().await.clone()
    }

    /// Re-read the fixture file. Returns the number of stations loaded.
    ///
    /// A source built with `from_stations` has nothing to reload and keeps
    /// its stations.
    pub async fn reload(&self) -> Result<usize, StationError> {
        let Some(path) = &self.path else {
            return Ok(self.stations.read().await.len());
        };

        let stations = load(path)?;
        let count = stations.len();
        *self.stations.write().await = stations;
        Ok(count)
    }
}

fn load(path: &Path) -> Result<Vec<Station>, StationError> {
    let json = std::fs::read_to_string(path).map_err(|e| StationError::Fixture {
        message: format!("failed to read {}: {e}", path.display()),
    })?;

    let pois: Vec<PoiDto> = serde_json::from_str(&json).map_err(|e| StationError::Fixture {
        message: format!("failed to parse {}: {e}", path.display()),
    })?;

    Ok(convert_pois(&pois))
}
