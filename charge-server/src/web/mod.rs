//! Web layer for the charging station locator.
//!
//! JSON endpoints for geocoding, raw station lookup and ranked search.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
