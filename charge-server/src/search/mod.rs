//! Searching for stations around a place.

mod error;
mod locator;
mod session;

pub use error::LookupError;
pub use locator::Locator;
pub use session::SearchSession;
