//! The state of one search.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::cache::StationFetch;
use crate::domain::{Coordinate, Distance, Station};
use crate::ranker::{RankedResult, StationRanker, ViewState, category_universe, distance_range};

/// A confirmed location, the stations found around it, and how the user is
/// currently viewing them.
///
/// A new search replaces the whole session, view included.
#[derive(Debug, Clone)]
pub struct SearchSession {
    location: Coordinate,
    place_name: Option<String>,
    fetched_at: DateTime<Utc>,
    stations: Arc<Vec<Station>>,
    pub view: ViewState,
}

impl SearchSession {
    /// Open a session around `location` with a fresh view.
    pub fn new(location: Coordinate, place_name: Option<String>, fetch: StationFetch) -> Self {
        Self {
            location,
            place_name,
            fetched_at: fetch.fetched_at,
            stations: fetch.stations,
            view: ViewState::new(Some(location)),
        }
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }

    pub fn place_name(&self) -> Option<&str> {
        self.place_name.as_deref()
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Filter choices for the current station list.
    pub fn categories(&self) -> Vec<&str> {
        category_universe(&self.stations)
    }

    /// Distances of the nearest and farthest located station from the
    /// session location.
    pub fn distance_range(&self) -> Option<(Distance, Distance)> {
        distance_range(&self.stations, &self.location)
    }

    /// The stations as the current view shows them.
    pub fn ranked(&self, ranker: &StationRanker) -> RankedResult<'_> {
        ranker.rank(&self.stations, &self.view)
    }
}
