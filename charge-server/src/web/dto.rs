//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Coordinate, Distance, InvalidCoordinate, Station, StationDetails, StationId,
};
use crate::geocode::Place;
use crate::ranker::{
    DistanceLimit, DistanceUnit, RankedResult, RankedStation, SortDirection, ViewState,
};
use crate::search::SearchSession;

/// A latitude/longitude pair as sent by clients. Validated on use.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationRequest {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationRequest {
    pub fn coordinate(&self) -> Result<Coordinate, InvalidCoordinate> {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Raw stations around a point.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<Station>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub place_name: Option<String>,
}

impl GeocodeResponse {
    pub fn from_place(place: &Place) -> Self {
        Self {
            latitude: place.location.latitude(),
            longitude: place.location.longitude(),
            place_name: place.name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReverseResponse {
    pub place_name: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<Suggestion>,
}

/// One autocomplete entry.
#[derive(Debug, Serialize)]
pub struct Suggestion {
    pub id: Option<String>,
    pub place_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Suggestion {
    pub fn from_place(place: &Place) -> Self {
        Self {
            id: place.id.clone(),
            place_name: place.name.clone(),
            latitude: place.location.latitude(),
            longitude: place.location.longitude(),
        }
    }
}

/// Where to search: typed text, or a point from geolocation or a map pin.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SearchLocation {
    Query { query: String },
    Point { latitude: f64, longitude: f64 },
}

/// How the client wants the results shown.
#[derive(Debug, Default, Deserialize)]
pub struct ViewRequest {
    #[serde(default)]
    pub sort: SortDirection,

    /// Maximum distance. Absent means no limit.
    pub distance_limit: Option<f64>,

    #[serde(default)]
    pub distance_unit: DistanceUnit,

    #[serde(default)]
    pub categories: Vec<String>,

    /// 1-based page, defaults to the first.
    pub page: Option<usize>,
}

impl ViewRequest {
    /// Apply the requested settings to a fresh view.
    pub fn apply(self, view: ViewState) -> ViewState {
        let limit = self
            .distance_limit
            .map_or(DistanceLimit::Unlimited, |v| DistanceLimit::new(v, self.distance_unit));

        let categories = self
            .categories
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        view.with_sort(self.sort)
            .with_distance_limit(limit)
            .with_categories(categories)
            .with_page(self.page.unwrap_or(1))
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub location: SearchLocation,

    #[serde(default)]
    pub view: ViewRequest,
}

/// Distance to a station in both units.
#[derive(Debug, Serialize)]
pub struct DistanceResult {
    pub km: f64,
    pub miles: f64,
    /// e.g. "12.34 km"
    pub km_text: String,
    /// e.g. "7.67 miles"
    pub miles_text: String,
}

impl DistanceResult {
    pub fn from_distance(distance: Distance) -> Self {
        Self {
            km: distance.km(),
            miles: distance.miles(),
            km_text: format!("{:.2} km", distance.km()),
            miles_text: format!("{:.2} miles", distance.miles()),
        }
    }
}

/// A station as shown in the result list and on the map.
#[derive(Debug, Serialize)]
pub struct StationCard {
    pub id: StationId,
    pub name: Option<String>,
    /// Single-line address
    pub address: Option<String>,
    pub location: Option<Coordinate>,
    pub category: Option<String>,
    /// Absent when the search had no reference point
    pub distance: Option<DistanceResult>,
    pub details: StationDetails,
}

impl StationCard {
    pub fn from_ranked(ranked: &RankedStation<'_>) -> Self {
        let station = ranked.station;
        Self {
            id: station.id.clone(),
            name: station.display_name().map(str::to_string),
            address: station.details.address.one_line(),
            location: station.location,
            category: station.category.clone(),
            distance: ranked.distance.map(DistanceResult::from_distance),
            details: station.details.clone(),
        }
    }
}

/// Nearest and farthest located station, for bounding a distance limit.
#[derive(Debug, Serialize)]
pub struct DistanceRange {
    pub min: DistanceResult,
    pub max: DistanceResult,
}

impl DistanceRange {
    pub fn from_bounds((min, max): (Distance, Distance)) -> Self {
        Self {
            min: DistanceResult::from_distance(min),
            max: DistanceResult::from_distance(max),
        }
    }
}

/// The view settings a result was produced with.
#[derive(Debug, Serialize)]
pub struct ViewResult {
    pub sort: SortDirection,
    /// `None` means no limit. A limit that admits nothing shows as zero.
    pub distance_limit_km: Option<f64>,
    pub categories: Vec<String>,
    pub page: usize,
}

impl ViewResult {
    pub fn from_view(view: &ViewState) -> Self {
        Self {
            sort: view.sort,
            distance_limit_km: match view.distance_limit {
                DistanceLimit::Unlimited => None,
                DistanceLimit::Within(d) => Some(d.km()),
                DistanceLimit::Excluding => Some(0.0),
            },
            categories: view.categories.iter().cloned().collect(),
            page: view.page,
        }
    }
}

/// One page of search results.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub location: Coordinate,
    pub place_name: Option<String>,
    pub fetched_at: DateTime<Utc>,

    /// Filter choices, from every station found
    pub categories: Vec<String>,

    /// `None` when no station has a position
    pub distance_range: Option<DistanceRange>,

    pub stations: Vec<StationCard>,
    pub total_count: usize,
    pub page: usize,
    pub page_count: usize,
    pub has_prev: bool,
    pub has_next: bool,
    /// e.g. "1–10 of 23"
    pub results_text: String,

    pub view: ViewResult,
}

impl SearchResponse {
    pub fn from_session(session: &SearchSession, ranked: &RankedResult<'_>) -> Self {
        Self {
            location: session.location(),
            place_name: session.place_name().map(str::to_string),
            fetched_at: session.fetched_at(),
            categories: session.categories().into_iter().map(str::to_string).collect(),
            distance_range: session.distance_range().map(DistanceRange::from_bounds),
            stations: ranked.items.iter().map(StationCard::from_ranked).collect(),
            total_count: ranked.total_count,
            page: ranked.page,
            page_count: ranked.page_count,
            has_prev: ranked.has_prev(),
            has_next: ranked.has_next(),
            results_text: ranked.results_text(),
            view: ViewResult::from_view(&session.view),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
