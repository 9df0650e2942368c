//! Application state for the web layer.

use std::sync::Arc;

use crate::ranker::StationRanker;
use crate::search::Locator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Geocoding and station lookup
    pub locator: Arc<Locator>,

    pub ranker: Arc<StationRanker>,
}

impl AppState {
    pub fn new(locator: Locator, ranker: StationRanker) -> Self {
        Self {
            locator: Arc::new(locator),
            ranker: Arc::new(ranker),
        }
    }
}
