use crate::archetypes::BuildingArchetype;
use crate::grid::{GridPos, Rotation};
use crate::test_harness::TestCity;
use crate::traffic::TrafficConfig;

// ===========================================================================
// 1. Graph follows the building list
// ===========================================================================

#[test]
fn graph_rebuilds_when_roads_are_placed() {
    let mut city = TestCity::new();
    city.start_build(BuildingArchetype::RoadStraight);
    city.click_tile(0, 0);
    city.tick();
    assert_eq!(city.road_graph().len(), 1);

    city.start_build(BuildingArchetype::House);
    city.click_tile(1, 1);
    city.tick();
    assert_eq!(city.road_graph().len(), 1, "houses are not road nodes");
}

#[test]
fn graph_shrinks_when_road_is_demolished() {
    let mut city = TestCity::new().with_straight_road_x(0, 3, 0);
    city.tick();
    assert_eq!(city.road_graph().len(), 4);

    city.click_tile(3, 0);
    city.tick();
    city.demolish_selected();
    city.tick();
    assert_eq!(city.road_graph().len(), 3);
    assert!(city.road_graph().node(GridPos::new(3, 0)).is_none());
}

// ===========================================================================
// 2. Vehicles
// ===========================================================================

#[test]
fn no_vehicles_without_roads() {
    let mut city = TestCity::new().with_building(BuildingArchetype::House, 2, 2, Rotation::Deg0);
    city.advance_secs(10.0);
    assert!(city.active_vehicles().is_empty());
}

#[test]
fn vehicles_spawn_on_road_cells() {
    let mut city = TestCity::new()
        .with_straight_road_x(0, 6, 4)
        .with_straight_road_y(7, 0, 8);
    city.advance_secs(6.0);

    let vehicles = city.active_vehicles();
    assert!(!vehicles.is_empty(), "roads should attract traffic within 6s");
    for v in &vehicles {
        let cell = v.current_cell().expect("active vehicle sits on a cell");
        assert!(
            city.road_graph().node(cell).is_some(),
            "vehicle on non-road cell {cell}"
        );
        assert!((v.position.y - 0.6).abs() < 1e-6);
    }
}

#[test]
fn active_vehicles_never_exceed_pool() {
    let config = TrafficConfig {
        pool_size: 3,
        spawn_interval_secs: 0.2,
        ..TrafficConfig::default()
    };
    let mut city = TestCity::with_config(config, 9)
        .with_straight_road_x(0, 20, 10)
        .with_straight_road_y(21, 0, 20);
    for _ in 0..300 {
        city.tick();
        assert!(city.active_vehicles().len() <= 3);
    }
}

#[test]
fn demolishing_road_releases_stranded_vehicles() {
    let config = TrafficConfig {
        pool_size: 1,
        min_hop_interval_secs: 50.0,
        max_hop_interval_secs: 50.0,
        ..TrafficConfig::default()
    };
    let mut city = TestCity::with_config(config, 3).with_road(
        BuildingArchetype::RoadStraight,
        5,
        5,
        Rotation::Deg0,
    );
    city.advance_secs(2.5);
    assert_eq!(city.active_vehicles().len(), 1);

    city.click_tile(5, 5);
    city.tick();
    city.demolish_selected();
    city.tick();
    assert!(city.active_vehicles().is_empty());
}

#[test]
fn same_seed_same_traffic() {
    let build = || {
        let mut city = TestCity::with_seed(77)
            .with_straight_road_x(0, 8, 3)
            .with_straight_road_y(9, 0, 6);
        city.advance_secs(12.0);
        city.active_vehicles()
    };
    assert_eq!(build(), build());
}
