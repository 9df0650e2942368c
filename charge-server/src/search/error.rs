//! User-facing lookup errors.

use crate::domain::InvalidCoordinate;
use crate::geocode::GeocodeError;
use crate::stations::StationError;

/// Why a search could not produce results.
///
/// Collaborator errors collapse into these three kinds; the detail of a
/// network failure is kept for logging.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    /// Geocoding found no place for the input, or the input was blank
    #[error("location not found")]
    LocationNotFound,

    /// A collaborator could not be reached or answered with an error
    #[error("lookup failed: {0}")]
    NetworkFailure(String),

    /// A coordinate was outside the valid range
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),
}

impl From<GeocodeError> for LookupError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::NotFound { .. } => LookupError::LocationNotFound,
            GeocodeError::InvalidCoordinate(e) => LookupError::InvalidCoordinate(e),
            other => LookupError::NetworkFailure(other.to_string()),
        }
    }
}

impl From<StationError> for LookupError {
    fn from(err: StationError) -> Self {
        LookupError::NetworkFailure(err.to_string())
    }
}
