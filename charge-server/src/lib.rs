//! Electric vehicle charging station locator server.
//!
//! Geocodes an address, fetches the charging stations around it from Open
//! Charge Map, and returns them sorted by distance, filtered and paginated.

pub mod cache;
pub mod config;
pub mod domain;
pub mod geocode;
pub mod ranker;
pub mod search;
pub mod stations;
pub mod web;

#[cfg(test)]
mod test_util;
