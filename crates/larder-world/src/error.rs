//! Error types for the `larder-world` crate.
//!
//! Queries never fail: a missing tile is simply "no station here". Errors
//! only arise when building a location.

use larder_types::TilePos;

/// Errors that can occur while building a location.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A tile was placed outside the location's bounds.
    #[error("tile {pos:?} is outside {location} ({width}x{height})")]
    OutOfBounds {
        /// Location name.
        location: String,
        /// The rejected position.
        pos: TilePos,
        /// Location width in tiles.
        width: u32,
        /// Location height in tiles.
        height: u32,
    },

    /// Two objects were placed on the same tile.
    #[error("tile {pos:?} in {location} is already occupied by {existing}")]
    TileOccupied {
        /// Location name.
        location: String,
        /// The contested position.
        pos: TilePos,
        /// Name of the object already there.
        existing: String,
    },
}
