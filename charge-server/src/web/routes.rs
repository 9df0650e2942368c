//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::InvalidCoordinate;
use crate::search::LookupError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/charging-stations", post(charging_stations))
        .route("/api/geocode", get(geocode))
        .route("/api/geocode/reverse", get(reverse_geocode))
        .route("/api/geocode/suggest", get(suggest))
        .route("/api/search", post(search))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Stations around a point, unranked.
async fn charging_stations(
    State(state): State<AppState>,
    Json(req): Json<LocationRequest>,
) -> Result<Json<StationsResponse>, AppError> {
    let at = req.coordinate()?;
    let fetch = state.locator.stations_at(at).await?;

    Ok(Json(StationsResponse {
        stations: fetch.stations.as_ref().clone(),
        fetched_at: fetch.fetched_at,
    }))
}

async fn geocode(
    State(state): State<AppState>,
    Query(req): Query<GeocodeQuery>,
) -> Result<Json<GeocodeResponse>, AppError> {
    let place = state.locator.forward(&req.q).await?;
    Ok(Json(GeocodeResponse::from_place(&place)))
}

async fn reverse_geocode(
    State(state): State<AppState>,
    Query(req): Query<LocationRequest>,
) -> Result<Json<ReverseResponse>, AppError> {
    let at = req.coordinate()?;
    let place_name = state.locator.reverse(at).await?;
    Ok(Json(ReverseResponse { place_name }))
}

async fn suggest(
    State(state): State<AppState>,
    Query(req): Query<GeocodeQuery>,
) -> Result<Json<SuggestResponse>, AppError> {
    let places = state.locator.suggest(&req.q).await?;
    Ok(Json(SuggestResponse {
        suggestions: places.iter().map(Suggestion::from_place).collect(),
    }))
}

/// Run a search and return the first view of it.
async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let mut session = match req.location {
        SearchLocation::Query { query } => state.locator.search_text(&query).await?,
        SearchLocation::Point {
            latitude,
            longitude,
        } => {
            let at = LocationRequest {
                latitude,
                longitude,
            }
            .coordinate()?;
            state.locator.search_at(at).await?
        }
    };

    session.view = req.view.apply(session.view);
    let ranked = session.ranked(&state.ranker);

    Ok(Json(SearchResponse::from_session(&session, &ranked)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::LocationNotFound => AppError::NotFound {
                message: "Location not found".to_string(),
            },
            LookupError::InvalidCoordinate(e) => AppError::from(e),
            LookupError::NetworkFailure(detail) => AppError::BadGateway {
                message: format!("lookup failed: {detail}"),
            },
        }
    }
}

impl From<InvalidCoordinate> for AppError {
    fn from(e: InvalidCoordinate) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
