use super::*;
use crate::archetypes::BuildingArchetype;
use crate::grid::{GridPos, Rotation};

fn record(id: u64, kind: &str, x: i32, y: i32) -> Building {
    Building {
        id,
        kind: kind.to_string(),
        x,
        y,
        rotation: Rotation::Deg0,
    }
}

#[test]
fn test_place_on_free_cell() {
    let mut city = CityBuildings::default();
    let id = city
        .try_place(BuildingArchetype::House, GridPos::new(5, 5), Rotation::Deg0)
        .expect("free cell accepts a building");
    assert!(city.is_occupied(GridPos::new(5, 5)));
    assert_eq!(city.get(id).map(|b| b.kind.as_str()), Some("house"));
    assert_eq!(city.generation(), 1);
}

#[test]
fn test_second_placement_on_same_cell_is_rejected() {
    let mut city = CityBuildings::default();
    city.try_place(BuildingArchetype::House, GridPos::new(5, 5), Rotation::Deg0)
        .unwrap();
    let before = city.as_slice().to_vec();
    let generation = city.generation();

    let err = city
        .try_place(BuildingArchetype::Park, GridPos::new(5, 5), Rotation::Deg90)
        .unwrap_err();

    assert_eq!(err, PlacementError::Occupied(GridPos::new(5, 5)));
    assert_eq!(city.as_slice(), before.as_slice());
    assert_eq!(city.generation(), generation);
}

#[test]
fn test_out_of_bounds_is_rejected() {
    let mut city = CityBuildings::default();
    let err = city
        .try_place(BuildingArchetype::House, GridPos::new(49, 0), Rotation::Deg0)
        .unwrap_err();
    assert_eq!(err, PlacementError::OutOfBounds(GridPos::new(49, 0)));
    assert!(city.is_empty());
}

#[test]
fn test_occupancy_exclusivity_under_many_attempts() {
    let mut city = CityBuildings::default();
    let archetypes = [
        BuildingArchetype::House,
        BuildingArchetype::Park,
        BuildingArchetype::RoadStraight,
    ];
    for i in 0..200 {
        let pos = GridPos::new(i % 7, (i / 3) % 5);
        let _ = city.try_place(archetypes[(i % 3) as usize], pos, Rotation::Deg0);
    }
    let mut cells = std::collections::HashSet::new();
    for b in city.iter() {
        assert!(cells.insert(b.pos()), "two buildings share {}", b.pos());
    }
    assert_eq!(city.len(), cells.len());
}

#[test]
fn test_ids_are_unique() {
    let mut city = CityBuildings::default();
    let a = city
        .try_place(BuildingArchetype::House, GridPos::new(0, 0), Rotation::Deg0)
        .unwrap();
    let b = city
        .try_place(BuildingArchetype::House, GridPos::new(1, 0), Rotation::Deg0)
        .unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_rotate_advances_quarter_turn() {
    let mut city = CityBuildings::default();
    let id = city
        .try_place(BuildingArchetype::RoadStraight, GridPos::new(2, 2), Rotation::Deg270)
        .unwrap();
    assert_eq!(city.rotate(id), Ok(Rotation::Deg0));
    assert_eq!(city.rotate(id), Ok(Rotation::Deg90));
    assert_eq!(city.rotate(999), Err(PlacementError::UnknownBuilding(999)));
}

#[test]
fn test_set_rotation_same_value_does_not_bump_generation() {
    let mut city = CityBuildings::default();
    let id = city
        .try_place(BuildingArchetype::House, GridPos::new(2, 2), Rotation::Deg90)
        .unwrap();
    let generation = city.generation();
    city.set_rotation(id, Rotation::Deg90).unwrap();
    assert_eq!(city.generation(), generation);
    city.set_rotation(id, Rotation::Deg180).unwrap();
    assert_eq!(city.get(id).unwrap().rotation, Rotation::Deg180);
    assert_eq!(city.generation(), generation + 1);
}

#[test]
fn test_remove_frees_cell() {
    let mut city = CityBuildings::default();
    let id = city
        .try_place(BuildingArchetype::House, GridPos::new(3, 4), Rotation::Deg0)
        .unwrap();
    let removed = city.remove(id).unwrap();
    assert_eq!(removed.pos(), GridPos::new(3, 4));
    assert!(!city.is_occupied(GridPos::new(3, 4)));
    assert_eq!(city.remove(id), Err(PlacementError::UnknownBuilding(id)));
}

#[test]
fn test_replace_all_drops_duplicate_cells_and_ids() {
    let mut city = CityBuildings::default();
    let dropped = city.replace_all(vec![
        record(10, "house", 1, 1),
        record(11, "park", 1, 1),
        record(10, "school", 2, 2),
        record(12, "castle", 3, 3),
    ]);
    assert_eq!(dropped, 2);
    assert_eq!(city.len(), 2);
    assert_eq!(city.find_at(GridPos::new(1, 1)).unwrap().kind, "house");
    // unknown archetypes still occupy their cell
    assert!(city.is_occupied(GridPos::new(3, 3)));
}

#[test]
fn test_replace_all_id_clash_does_not_block_its_cell() {
    let mut city = CityBuildings::default();
    let dropped = city.replace_all(vec![
        record(1, "house", 0, 0),
        record(1, "park", 1, 1),
        record(2, "school", 1, 1),
    ]);
    assert_eq!(dropped, 1);
    assert_eq!(city.get(2).map(|b| b.pos()), Some(GridPos::new(1, 1)));
    assert_eq!(city.get(1).map(|b| b.pos()), Some(GridPos::new(0, 0)));
}

#[test]
fn test_replace_all_cell_clash_does_not_claim_its_id() {
    let mut city = CityBuildings::default();
    let dropped = city.replace_all(vec![
        record(1, "house", 0, 0),
        record(2, "park", 0, 0),
        record(2, "school", 3, 3),
    ]);
    assert_eq!(dropped, 1);
    assert_eq!(city.get(2).map(|b| b.pos()), Some(GridPos::new(3, 3)));
}

#[test]
fn test_max_id_from_store_does_not_overflow() {
    let mut city = CityBuildings::default();
    city.replace_all(vec![record(u64::MAX, "house", 0, 0)]);
    let first = city
        .try_place(BuildingArchetype::Park, GridPos::new(1, 0), Rotation::Deg0)
        .unwrap();
    let second = city
        .try_place(BuildingArchetype::Park, GridPos::new(2, 0), Rotation::Deg0)
        .unwrap();
    assert_eq!(first, 0);
    assert_eq!(second, 1);
    assert!(city.get(u64::MAX).is_some());
}

#[test]
fn test_replace_all_continues_id_sequence() {
    let mut city = CityBuildings::default();
    city.replace_all(vec![record(41, "house", 0, 0)]);
    let id = city
        .try_place(BuildingArchetype::Park, GridPos::new(1, 0), Rotation::Deg0)
        .unwrap();
    assert_eq!(id, 42);
}

#[test]
fn test_building_json_shape() {
    let b = Building::new(7, BuildingArchetype::RoadCurve, GridPos::new(4, 9), Rotation::Deg180);
    let json = serde_json::to_value(&b).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "id": 7, "type": "road_curve", "x": 4, "y": 9, "rotation": 180 })
    );
    let missing_rotation: Building =
        serde_json::from_str(r#"{ "id": 1, "type": "house", "x": 0, "y": 0 }"#).unwrap();
    assert_eq!(missing_rotation.rotation, Rotation::Deg0);
}

#[test]
fn test_unknown_archetype_record_reports_error() {
    let b = record(1, "castle", 0, 0);
    assert!(b.archetype().is_err());
}
