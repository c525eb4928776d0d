//! Cooking station lookup around the player.
//!
//! Three mutually exclusive strategies, chosen by where the player is:
//!
//! 1. **Landmark** -- the configured tavern. Within `radius` of the
//!    landmark tile the level is `max(landmark, client)` equipment.
//! 2. **Enclosed** -- any other interior. The square of side `2r + 1`
//!    around the player is scanned for a kitchen tile (action `kitchen`,
//!    or an allow-listed tile index). Dwellings derive the level from their
//!    upgrade tier; other interiors use `max(2, client)`.
//! 3. **Open air** -- the same square is scanned for a campfire object;
//!    the level is `client - 1`.
//!
//! Scans are row-major with x as the outer loop and stop at the first
//! qualifying tile, so the smallest `(dx, dy)` offset wins ties.

use larder_types::{LocationKind, TilePos};
use serde::Deserialize;
use tracing::debug;

use crate::location::TileQuery;

/// Largest radius the scanner honours; larger values are clamped.
pub const MAX_SEARCH_RADIUS: u32 = 32;

/// Tile action that marks a kitchen counter.
pub const KITCHEN_ACTION: &str = "kitchen";

/// A fixed cooking range in a named location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Landmark {
    /// Location name the landmark lives in.
    pub location: String,
    /// Tile of the cooking range.
    pub tile: TilePos,
}

impl Default for Landmark {
    fn default() -> Self {
        Self {
            location: "Saloon".to_owned(),
            tile: TilePos::new(16, 16),
        }
    }
}

/// Equipment levels read from save data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EquipmentLevels {
    /// This client's own cooking equipment.
    pub client: i32,
    /// The landmark range's shared equipment.
    pub landmark: i32,
}

/// Parameters of one station search.
#[derive(Debug, Clone, Copy)]
pub struct StationSearch<'a> {
    /// Player tile.
    pub player: TilePos,
    /// Search radius in tiles.
    pub radius: u32,
    /// The fixed landmark range.
    pub landmark: &'a Landmark,
    /// Buildings-layer tile indices that act as kitchens.
    pub station_tiles: &'a [u32],
    /// Object name of a campfire.
    pub campfire_object: &'a str,
    /// Equipment levels.
    pub equipment: EquipmentLevels,
}

/// Which strategy produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationStrategy {
    /// The fixed landmark range.
    Landmark,
    /// A kitchen tile indoors.
    Enclosed,
    /// A campfire outdoors.
    OpenAir,
}

/// A located cooking station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationMatch {
    /// Available equipment level.
    pub level: i32,
    /// The qualifying tile.
    pub tile: TilePos,
    /// Strategy that found it.
    pub strategy: StationStrategy,
}

/// Find the nearest usable cooking station, if any.
pub fn find_station(location: &(impl TileQuery + ?Sized), search: &StationSearch<'_>) -> Option<StationMatch> {
    let found = if location.name() == search.landmark.location {
        landmark_station(search)
    } else {
        match location.kind() {
            LocationKind::Outdoors => scan(search, |pos| {
                (location.object_name(pos) == Some(search.campfire_object)).then(|| StationMatch {
                    level: search.equipment.client.saturating_sub(1),
                    tile: pos,
                    strategy: StationStrategy::OpenAir,
                })
            }),
            kind => scan(search, |pos| {
                is_kitchen_tile(location, pos, search.station_tiles).then(|| StationMatch {
                    level: enclosed_level(kind, search.equipment.client),
                    tile: pos,
                    strategy: StationStrategy::Enclosed,
                })
            }),
        }
    };

    debug!(
        location = location.name(),
        player = ?search.player,
        level = found.map_or(0, |m| m.level),
        strategy = ?found.map(|m| m.strategy),
        "Cooking station search finished"
    );
    found
}

/// Station level around the player, 0 when there is none.
pub fn find_station_level(location: &(impl TileQuery + ?Sized), search: &StationSearch<'_>) -> i32 {
    find_station(location, search).map_or(0, |m| m.level)
}

fn landmark_station(search: &StationSearch<'_>) -> Option<StationMatch> {
    search
        .player
        .within_radius(search.landmark.tile, search.radius)
        .then(|| StationMatch {
            level: search.equipment.landmark.max(search.equipment.client),
            tile: search.landmark.tile,
            strategy: StationStrategy::Landmark,
        })
}

fn is_kitchen_tile(location: &(impl TileQuery + ?Sized), pos: TilePos, station_tiles: &[u32]) -> bool {
    location.building_tile(pos).is_some_and(|index| {
        location.tile_action(pos) == Some(KITCHEN_ACTION) || station_tiles.contains(&index)
    })
}

/// Level of an indoor kitchen.
///
/// A dwelling below upgrade tier 2 has no real kitchen and caps at 2; from
/// tier 2 the tier itself is a floor.
pub fn enclosed_level(kind: LocationKind, client: i32) -> i32 {
    match kind {
        LocationKind::Dwelling { upgrade_tier } if upgrade_tier < 2 => client.min(2),
        LocationKind::Dwelling { upgrade_tier } => {
            i32::try_from(upgrade_tier).unwrap_or(i32::MAX).max(client)
        }
        LocationKind::Interior | LocationKind::Outdoors => client.max(2),
    }
}

/// Row-major scan of the square around the player: x outer, y inner.
fn scan(
    search: &StationSearch<'_>,
    mut probe: impl FnMut(TilePos) -> Option<StationMatch>,
) -> Option<StationMatch> {
    let radius = i32::try_from(search.radius.min(MAX_SEARCH_RADIUS)).unwrap_or(0);
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            if let Some(found) = probe(search.player.offset(dx, dy)) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dwelling_levels_follow_upgrade_tier() {
        let starter = LocationKind::Dwelling { upgrade_tier: 0 };
        let kitchen = LocationKind::Dwelling { upgrade_tier: 2 };
        let cellar = LocationKind::Dwelling { upgrade_tier: 3 };
        assert_eq!(enclosed_level(starter, 5), 2);
        assert_eq!(enclosed_level(starter, 1), 1);
        assert_eq!(enclosed_level(kitchen, 1), 2);
        assert_eq!(enclosed_level(kitchen, 4), 4);
        assert_eq!(enclosed_level(cellar, 0), 3);
    }

    #[test]
    fn other_interiors_floor_at_two() {
        assert_eq!(enclosed_level(LocationKind::Interior, 0), 2);
        assert_eq!(enclosed_level(LocationKind::Interior, 5), 5);
    }

    #[test]
    fn landmark_deserializes_from_config() {
        let parsed: Result<Landmark, _> =
            serde_json::from_str(r#"{"location":"Tavern","tile":{"x":3,"y":9}}"#);
        assert!(parsed.is_ok());
        let landmark = parsed.ok().unwrap_or_default();
        assert_eq!(landmark.location, "Tavern");
        assert_eq!(landmark.tile, TilePos::new(3, 9));
    }
}
