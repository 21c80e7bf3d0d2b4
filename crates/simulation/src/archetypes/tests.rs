use std::collections::HashSet;

use super::*;
use crate::grid::Rotation;

#[test]
fn test_keys_are_unique_and_round_trip() {
    let mut seen = HashSet::new();
    for &archetype in BuildingArchetype::ALL {
        assert!(seen.insert(archetype.key()), "duplicate key {}", archetype.key());
        assert_eq!(BuildingArchetype::from_key(archetype.key()), Ok(archetype));
    }
}

#[test]
fn test_unknown_key_is_an_error() {
    let err = BuildingArchetype::from_key("castle").unwrap_err();
    assert_eq!(err, ArchetypeError::Unknown("castle".to_string()));
    assert_eq!(err.to_string(), "unknown archetype 'castle'");
}

#[test]
fn test_eleven_road_archetypes_carry_connectivity() {
    let roads: Vec<_> = BuildingArchetype::ALL
        .iter()
        .filter(|a| a.is_road())
        .collect();
    assert_eq!(roads.len(), 11);
    for road in roads {
        let pattern = road.road_connectivity().unwrap();
        assert!((1..=4).contains(&pattern.len()), "{road} has {} offsets", pattern.len());
        assert_eq!(road.category(), BuildingCategory::Infrastructure);
    }
}

#[test]
fn test_non_road_infrastructure_is_not_drivable() {
    assert!(!BuildingArchetype::RoadSquare.is_road());
    assert!(!BuildingArchetype::Fence.is_road());
    assert!(!BuildingArchetype::House.is_road());
}

#[test]
fn test_rotation_closure_for_every_road() {
    for &archetype in BuildingArchetype::ALL {
        let Some(pattern) = archetype.road_connectivity() else {
            continue;
        };
        for &offset in pattern {
            let mut rotated = offset;
            for _ in 0..4 {
                rotated = rotated.rotated(Rotation::Deg90);
            }
            assert_eq!(rotated, offset, "{archetype}: four quarter turns must be identity");
        }
    }
}

#[test]
fn test_straight_rotation_mapping() {
    let pattern = BuildingArchetype::RoadStraight.road_connectivity().unwrap();
    let at_zero: HashSet<_> = pattern.iter().map(|o| o.rotated(Rotation::Deg0)).collect();
    let at_ninety: HashSet<_> = pattern.iter().map(|o| o.rotated(Rotation::Deg90)).collect();
    assert_eq!(at_zero, HashSet::from([Offset::new(-1, 0), Offset::new(1, 0)]));
    assert_eq!(at_ninety, HashSet::from([Offset::new(0, -1), Offset::new(0, 1)]));
}

#[test]
fn test_costs_follow_category() {
    assert_eq!(BuildingArchetype::House.cost(), 10);
    assert_eq!(BuildingArchetype::RoadStraight.cost(), 1);
    assert_eq!(BuildingArchetype::TreeLarge.cost(), 25);
    assert_eq!(BuildingArchetype::Mission.cost(), 1000);
}

#[test]
fn test_every_category_has_entries() {
    for category in BuildingCategory::ALL {
        assert!(
            BuildingArchetype::in_category(category).next().is_some(),
            "{} is empty",
            category.label()
        );
    }
}

#[test]
fn test_vehicle_archetypes_are_distinct() {
    let keys: HashSet<_> = VehicleArchetype::ALL.iter().map(|v| v.key()).collect();
    assert_eq!(keys.len(), VehicleArchetype::ALL.len());
    let paths: HashSet<_> = VehicleArchetype::ALL.iter().map(|v| v.model_path()).collect();
    assert_eq!(paths.len(), VehicleArchetype::ALL.len());
}

#[test]
fn test_vehicle_placeholder_color_is_deterministic() {
    for v in VehicleArchetype::ALL {
        assert_eq!(v.placeholder_color(), v.placeholder_color());
    }
    assert_ne!(
        VehicleArchetype::Sedan.placeholder_color(),
        VehicleArchetype::Suv.placeholder_color()
    );
}
