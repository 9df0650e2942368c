//! Geocoding error types.

use crate::domain::InvalidCoordinate;

/// Errors that can occur when geocoding.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Access token missing or rejected
    #[error("unauthorized: check MAPBOX_TOKEN")]
    Unauthorized,

    #[error("rate limited by Mapbox")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The query matched no place
    #[error("no place found for {query:?}")]
    NotFound { query: String },

    /// The service returned a position outside the valid range
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// Client could not be configured
    #[error("configuration error: {0}")]
    Config(String),
}
