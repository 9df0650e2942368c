//! Domain types for the charging-station locator.
//!
//! Coordinates are validated at construction time, so code that receives a
//! `Coordinate` can compute distances without further checks. Stations carry
//! an optional location because upstream records are not always complete.

mod coordinate;
mod station;

pub use coordinate::{
    Coordinate, Distance, EARTH_RADIUS_KM, InvalidCoordinate, MILES_PER_KM, haversine_km,
};
pub use station::{
    Address, Connection, OpeningTime, Operator, Station, StationDetails, StationId,
    normalize_category,
};
