use crate::archetypes::BuildingArchetype;
use crate::buildings::{Building, PlacementError};
use crate::grid::{GridPos, Rotation};
use crate::placement::{BuildingPlaced, PlacementRejected};
use crate::test_harness::TestCity;

// ===========================================================================
// 1. Harness bootstrap
// ===========================================================================

#[test]
fn empty_city_has_no_buildings() {
    let city = TestCity::new();
    assert_eq!(city.building_count(), 0, "empty city should have 0 buildings");
    assert!(city.road_graph().is_empty());
    assert!(!city.active_build().is_active());
}

// ===========================================================================
// 2. Committing placements
// ===========================================================================

#[test]
fn click_with_active_build_places_building() {
    let mut city = TestCity::new();
    city.start_build(BuildingArchetype::House);
    city.click_tile(5, 5);
    city.tick();

    let placed = city.buildings().find_at(GridPos::new(5, 5)).cloned();
    assert_eq!(placed.map(|b| b.kind), Some("house".to_string()));
    assert!(
        !city.active_build().is_active(),
        "a successful placement clears the active build type"
    );
    let events = city.drain_events::<BuildingPlaced>();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].pos, GridPos::new(5, 5));
}

#[test]
fn second_placement_on_same_cell_is_rejected() {
    let mut city = TestCity::new();
    city.start_build(BuildingArchetype::House);
    city.click_tile(5, 5);
    city.tick();
    let before = city.buildings().as_slice().to_vec();

    city.start_build(BuildingArchetype::Park);
    city.click_tile(5, 5);
    city.tick();

    assert_eq!(city.buildings().as_slice(), before.as_slice(), "list must be unchanged");
    let rejected = city.drain_events::<PlacementRejected>();
    assert_eq!(
        rejected,
        vec![PlacementRejected {
            pos: GridPos::new(5, 5),
            reason: PlacementError::Occupied(GridPos::new(5, 5)),
        }]
    );
    assert_eq!(
        city.active_build().archetype,
        Some(BuildingArchetype::Park),
        "a rejected click keeps the build type so the user can retry"
    );
}

#[test]
fn pending_rotation_is_applied_on_commit() {
    let mut city = TestCity::new();
    city.start_build(BuildingArchetype::RoadStraight);
    city.rotate_selected();
    city.tick();
    assert_eq!(city.active_build().rotation, Rotation::Deg90);

    city.click_tile(2, 2);
    city.tick();
    let road = city.buildings().find_at(GridPos::new(2, 2)).unwrap();
    assert_eq!(road.rotation, Rotation::Deg90);
}

#[test]
fn cancel_build_clears_active_type() {
    let mut city = TestCity::new();
    city.start_build(BuildingArchetype::School);
    city.cancel_build();
    city.tick();
    assert!(!city.active_build().is_active());

    city.click_tile(1, 1);
    city.tick();
    assert_eq!(city.building_count(), 0, "click after cancel must not place");
}

// ===========================================================================
// 3. Selection, rotate, demolish
// ===========================================================================

#[test]
fn click_without_active_build_selects_building() {
    let mut city = TestCity::new().with_building(BuildingArchetype::House, 3, 3, Rotation::Deg0);
    let id = city.buildings().find_at(GridPos::new(3, 3)).unwrap().id;

    city.click_tile(3, 3);
    city.tick();
    assert_eq!(city.selected().0, Some(id));

    city.click_tile(4, 4);
    city.tick();
    assert_eq!(city.selected().0, None, "clicking empty ground deselects");
}

#[test]
fn rotate_and_demolish_selected_building() {
    let mut city = TestCity::new().with_building(BuildingArchetype::House, 3, 3, Rotation::Deg0);
    city.click_tile(3, 3);
    city.tick();

    city.rotate_selected();
    city.tick();
    let rotation = city.buildings().find_at(GridPos::new(3, 3)).unwrap().rotation;
    assert_eq!(rotation, Rotation::Deg90);

    city.demolish_selected();
    city.tick();
    assert!(!city.buildings().is_occupied(GridPos::new(3, 3)));
    assert_eq!(city.selected().0, None);
}

#[test]
fn store_refresh_drops_stale_selection() {
    let mut city = TestCity::new().with_building(BuildingArchetype::House, 3, 3, Rotation::Deg0);
    city.click_tile(3, 3);
    city.tick();
    assert!(city.selected().0.is_some());

    let refreshed = vec![Building::new(
        500,
        BuildingArchetype::Park,
        GridPos::new(8, 8),
        Rotation::Deg0,
    )];
    let mut city = city.with_buildings(refreshed);
    city.tick();
    assert_eq!(city.selected().0, None);
    assert_eq!(city.building_count(), 1);
}

#[test]
fn placements_never_share_a_cell() {
    let mut city = TestCity::new();
    let kinds = [
        BuildingArchetype::House,
        BuildingArchetype::Park,
        BuildingArchetype::RoadCrossroad,
    ];
    for i in 0..60 {
        city.start_build(kinds[i % kinds.len()]);
        city.click_tile((i % 4) as i32, (i % 3) as i32);
        city.tick();
    }
    let mut cells = std::collections::HashSet::new();
    for b in city.buildings().iter() {
        assert!(cells.insert(b.pos()), "duplicate building at {}", b.pos());
    }
    assert_eq!(city.building_count(), 12);
}
