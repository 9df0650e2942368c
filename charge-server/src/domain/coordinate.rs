//! Geographic coordinates and great-circle distance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Miles per kilometer.
pub const MILES_PER_KM: f64 = 0.621371;

/// Error returned when a latitude/longitude pair is not a usable coordinate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({latitude}, {longitude}): {reason}")]
pub struct InvalidCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    reason: &'static str,
}

/// A validated WGS84 coordinate.
///
/// Both components are finite, latitude is within [-90, 90] and longitude
/// within [-180, 180]. Any `Coordinate` value satisfies this by construction,
/// so distance computations never see NaN.
///
/// # Examples
///
/// ```
/// use charge_server::domain::Coordinate;
///
/// let philly = Coordinate::new(40.0, -75.0).unwrap();
/// assert_eq!(philly.latitude(), 40.0);
///
/// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, -180.5).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

/// Unvalidated wire form of a coordinate.
#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Create a coordinate, validating both components.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        let reject = |reason| InvalidCoordinate {
            latitude,
            longitude,
            reason,
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(reject("components must be finite"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(reject("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(reject("longitude must be within [-180, 180]"));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a coordinate from a `[longitude, latitude]` pair, the order
    /// used by GeoJSON and the Mapbox `center` field.
    pub fn from_lon_lat(pair: &[f64]) -> Result<Self, InvalidCoordinate> {
        match pair {
            [lon, lat] => Self::new(*lat, *lon),
            _ => Err(InvalidCoordinate {
                latitude: f64::NAN,
                longitude: f64::NAN,
                reason: "expected a [longitude, latitude] pair",
            }),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other`.
    pub fn distance_to(&self, other: &Coordinate) -> Distance {
        Distance::from_km(haversine_km(self, other))
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// Haversine great-circle distance between two coordinates, in kilometers.
///
/// Symmetric, zero for identical points, and monotone in the angular
/// separation of the two points.
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    // sin² is even, so taking magnitudes keeps the result bit-identical
    // when the arguments are swapped
    let d_lat = (b.latitude - a.latitude).abs().to_radians();
    let d_lon = (b.longitude - a.longitude).abs().to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] near antipodes
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// A non-negative distance, stored in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub fn from_km(km: f64) -> Self {
        Self(km)
    }

    pub fn from_miles(miles: f64) -> Self {
        Self(miles / MILES_PER_KM)
    }

    pub fn km(&self) -> f64 {
        self.0
    }

    pub fn miles(&self) -> f64 {
        self.0 * MILES_PER_KM
    }
}
