//! Location queries and cooking station lookup for the Larder engine.
//!
//! The host owns its maps; this crate only reads them through the
//! [`TileQuery`] seam.
//!
//! # Modules
//!
//! - [`error`] -- Error types for building locations ([`WorldError`]).
//! - [`location`] -- [`TileQuery`] and the in-memory [`GridLocation`].
//! - [`station`] -- Three-strategy cooking station locator.

pub mod error;
pub mod location;
pub mod station;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use location::{GridLocation, TileQuery};
pub use station::{
    EquipmentLevels, Landmark, StationMatch, StationSearch, StationStrategy, find_station,
    find_station_level,
};
