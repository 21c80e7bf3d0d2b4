//! Authoritative list of placed buildings.
//!
//! `CityBuildings` is the only place building records are created, rotated or
//! removed. Every mutator checks occupancy first so at most one record sits on
//! any cell.

mod store;
#[cfg(test)]
mod tests;
pub mod types;

pub use store::CityBuildings;
pub use types::{Building, BuildingId, PlacementError};
