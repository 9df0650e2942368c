//! Station ranking engine.
//!
//! Turns a raw station list plus the user's current view (reference point,
//! sort direction, distance limit, category selection, page) into the
//! ordered page of stations to display. Pure and synchronous: no I/O, no
//! shared state.

mod config;
mod rank;
mod view;

pub use config::{DEFAULT_PAGE_SIZE, RankConfig};
pub use rank::{RankedResult, RankedStation, StationRanker, category_universe, distance_range};
pub use view::{DistanceLimit, DistanceUnit, SortDirection, ViewState};
