//! Read-only tile queries against a host location.
//!
//! The host owns its maps. The engine only needs four facts about a tile:
//! the building-layer tile index, the tile's action property, and the name
//! of any placed object, plus the location's name and classification.
//! [`TileQuery`] is that seam; [`GridLocation`] is an in-memory
//! implementation for tests and the headless harness.

use std::collections::BTreeMap;

use larder_types::{LocationKind, TilePos};

use crate::error::WorldError;

/// Tile lookups the station locator performs.
///
/// Coordinates outside the location return `None`.
pub trait TileQuery {
    /// Location name, compared against the configured landmark.
    fn name(&self) -> &str;

    /// Location classification.
    fn kind(&self) -> LocationKind;

    /// Tile index on the buildings layer, if a tile exists there.
    fn building_tile(&self, pos: TilePos) -> Option<u32>;

    /// The `Action` property of the buildings-layer tile, if any.
    fn tile_action(&self, pos: TilePos) -> Option<&str>;

    /// Name of the object placed on the tile, if any.
    fn object_name(&self, pos: TilePos) -> Option<&str>;
}

/// A single buildings-layer tile.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BuildingTile {
    index: u32,
    action: Option<String>,
}

/// Bounded in-memory location.
#[derive(Debug, Clone)]
pub struct GridLocation {
    name: String,
    kind: LocationKind,
    width: u32,
    height: u32,
    buildings: BTreeMap<TilePos, BuildingTile>,
    objects: BTreeMap<TilePos, String>,
}

impl GridLocation {
    /// Create an empty location of the given size.
    pub fn new(name: impl Into<String>, kind: LocationKind, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            width,
            height,
            buildings: BTreeMap::new(),
            objects: BTreeMap::new(),
        }
    }

    /// Return `true` if `pos` lies within the location.
    pub fn contains(&self, pos: TilePos) -> bool {
        let inside = |v: i32, limit: u32| u32::try_from(v).is_ok_and(|v| v < limit);
        inside(pos.x, self.width) && inside(pos.y, self.height)
    }

    fn check_bounds(&self, pos: TilePos) -> Result<(), WorldError> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(WorldError::OutOfBounds {
                location: self.name.clone(),
                pos,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Place (or replace) a buildings-layer tile.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `pos` is outside the location.
    pub fn set_building_tile(
        &mut self,
        pos: TilePos,
        index: u32,
        action: Option<&str>,
    ) -> Result<(), WorldError> {
        self.check_bounds(pos)?;
        self.buildings.insert(
            pos,
            BuildingTile {
                index,
                action: action.map(str::to_owned),
            },
        );
        Ok(())
    }

    /// Place an object on an empty tile.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `pos` is outside the location,
    /// or [`WorldError::TileOccupied`] if an object is already there.
    pub fn place_object(&mut self, pos: TilePos, name: impl Into<String>) -> Result<(), WorldError> {
        self.check_bounds(pos)?;
        if let Some(existing) = self.objects.get(&pos) {
            return Err(WorldError::TileOccupied {
                location: self.name.clone(),
                pos,
                existing: existing.clone(),
            });
        }
        self.objects.insert(pos, name.into());
        Ok(())
    }

    /// Remove and return the object on a tile.
    pub fn remove_object(&mut self, pos: TilePos) -> Option<String> {
        self.objects.remove(&pos)
    }

    /// Change the location's classification (e.g. after a house upgrade).
    pub const fn set_kind(&mut self, kind: LocationKind) {
        self.kind = kind;
    }
}

impl TileQuery for GridLocation {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> LocationKind {
        self.kind
    }

    fn building_tile(&self, pos: TilePos) -> Option<u32> {
        self.buildings.get(&pos).map(|t| t.index)
    }

    fn tile_action(&self, pos: TilePos) -> Option<&str> {
        self.buildings.get(&pos).and_then(|t| t.action.as_deref())
    }

    fn object_name(&self, pos: TilePos) -> Option<&str> {
        self.objects.get(&pos).map(String::as_str)
    }
}
