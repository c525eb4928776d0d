//! Cooking station lookup across the three location classes.

#![allow(clippy::unwrap_used)]

use larder_types::{LocationKind, TilePos};
use larder_world::{
    EquipmentLevels, GridLocation, Landmark, StationSearch, StationStrategy, TileQuery,
    find_station, find_station_level,
};

const STATION_TILES: &[u32] = &[498, 499, 631, 632, 633];

fn search<'a>(landmark: &'a Landmark, player: TilePos, client: i32) -> StationSearch<'a> {
    StationSearch {
        player,
        radius: 2,
        landmark,
        station_tiles: STATION_TILES,
        campfire_object: "Cookout Kit",
        equipment: EquipmentLevels {
            client,
            landmark: 3,
        },
    }
}

#[test]
fn landmark_uses_shared_equipment_when_near() {
    let landmark = Landmark::default();
    let saloon = GridLocation::new("Saloon", LocationKind::Interior, 40, 30);

    let near = find_station(&saloon, &search(&landmark, TilePos::new(17, 15), 1)).unwrap();
    assert_eq!(near.level, 3);
    assert_eq!(near.strategy, StationStrategy::Landmark);
    assert_eq!(near.tile, TilePos::new(16, 16));

    let upgraded = find_station_level(&saloon, &search(&landmark, TilePos::new(16, 18), 5));
    assert_eq!(upgraded, 5);

    let far = find_station_level(&saloon, &search(&landmark, TilePos::new(20, 16), 5));
    assert_eq!(far, 0);
}

#[test]
fn landmark_ignores_kitchen_tiles_in_the_same_location() {
    let landmark = Landmark::default();
    let mut saloon = GridLocation::new("Saloon", LocationKind::Interior, 40, 30);
    saloon.set_building_tile(TilePos::new(2, 2), 498, None).unwrap();
    assert_eq!(find_station_level(&saloon, &search(&landmark, TilePos::new(2, 3), 1)), 0);
}

#[test]
fn starter_dwelling_caps_at_two() {
    let landmark = Landmark::default();
    let mut house = GridLocation::new("FarmHouse", LocationKind::Dwelling { upgrade_tier: 1 }, 20, 12);
    house.set_building_tile(TilePos::new(5, 5), 12, Some("kitchen")).unwrap();

    let found = find_station(&house, &search(&landmark, TilePos::new(4, 4), 4)).unwrap();
    assert_eq!(found.level, 2);
    assert_eq!(found.strategy, StationStrategy::Enclosed);

    house.set_kind(LocationKind::Dwelling { upgrade_tier: 3 });
    assert_eq!(find_station_level(&house, &search(&landmark, TilePos::new(4, 4), 1)), 3);
    assert_eq!(find_station_level(&house, &search(&landmark, TilePos::new(4, 4), 4)), 4);
}

#[test]
fn allow_listed_tile_counts_without_action() {
    let landmark = Landmark::default();
    let mut shop = GridLocation::new("Bakery", LocationKind::Interior, 20, 20);
    shop.set_building_tile(TilePos::new(10, 10), 631, None).unwrap();
    assert_eq!(find_station_level(&shop, &search(&landmark, TilePos::new(9, 11), 0)), 2);
}

#[test]
fn tile_without_action_or_allow_listed_index_is_ignored() {
    let landmark = Landmark::default();
    let mut shop = GridLocation::new("Bakery", LocationKind::Interior, 20, 20);
    shop.set_building_tile(TilePos::new(10, 10), 7, Some("Mailbox")).unwrap();
    assert!(find_station(&shop, &search(&landmark, TilePos::new(10, 10), 0)).is_none());
}

#[test]
fn search_square_is_inclusive_of_radius() {
    let landmark = Landmark::default();
    let mut shop = GridLocation::new("Bakery", LocationKind::Interior, 20, 20);
    shop.set_building_tile(TilePos::new(12, 8), 498, None).unwrap();
    assert!(find_station(&shop, &search(&landmark, TilePos::new(10, 10), 0)).is_some());
    assert!(find_station(&shop, &search(&landmark, TilePos::new(9, 10), 0)).is_none());
}

#[test]
fn row_major_scan_prefers_smallest_x_offset() {
    let landmark = Landmark::default();
    let mut shop = GridLocation::new("Bakery", LocationKind::Dwelling { upgrade_tier: 2 }, 20, 20);
    shop.set_building_tile(TilePos::new(10, 10), 498, None).unwrap();
    shop.set_building_tile(TilePos::new(9, 11), 499, None).unwrap();
    shop.set_building_tile(TilePos::new(9, 9), 499, None).unwrap();

    let found = find_station(&shop, &search(&landmark, TilePos::new(10, 10), 0)).unwrap();
    assert_eq!(found.tile, TilePos::new(9, 9));
}

#[test]
fn campfire_outdoors_is_one_below_client() {
    let landmark = Landmark::default();
    let mut forest = GridLocation::new("Forest", LocationKind::Outdoors, 60, 60);
    forest.place_object(TilePos::new(30, 31), "Cookout Kit").unwrap();
    forest.set_building_tile(TilePos::new(30, 30), 498, Some("kitchen")).unwrap();

    let found = find_station(&forest, &search(&landmark, TilePos::new(30, 30), 3)).unwrap();
    assert_eq!(found.strategy, StationStrategy::OpenAir);
    assert_eq!(found.level, 2);
    assert_eq!(found.tile, TilePos::new(30, 31));

    assert_eq!(find_station_level(&forest, &search(&landmark, TilePos::new(30, 30), 0)), -1);
}

#[test]
fn nothing_nearby_reports_zero() {
    let landmark = Landmark::default();
    let forest = GridLocation::new("Forest", LocationKind::Outdoors, 60, 60);
    assert_eq!(forest.name(), "Forest");
    assert_eq!(find_station_level(&forest, &search(&landmark, TilePos::new(0, 0), 3)), 0);
}
