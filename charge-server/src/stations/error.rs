//! Station source error types.

/// Errors that can occur when fetching stations.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check OCM_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by Open Charge Map")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Local fixture could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },
}
