//! Drivable graph derived from road-type buildings.
//!
//! One node per road building, keyed by cell, carrying the archetype's base
//! connectivity rotated by the building's rotation. The graph is rebuilt from
//! scratch whenever the building list changes.

use std::collections::BTreeMap;

use bevy::prelude::*;
use rand::Rng;

use crate::archetypes::BuildingArchetype;
use crate::buildings::{Building, CityBuildings};
use crate::grid::{GridPos, Offset};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadNode {
    pub pos: GridPos,
    pub archetype: BuildingArchetype,
    /// Rotated offsets this tile opens towards.
    pub connections: Vec<Offset>,
}

impl RoadNode {
    /// `None` when the building is not a drivable road or its archetype is unknown.
    pub fn from_building(building: &Building) -> Option<Self> {
        let archetype = building.archetype().ok()?;
        let base = archetype.road_connectivity()?;
        Some(Self {
            pos: building.pos(),
            archetype,
            connections: base.iter().map(|o| o.rotated(building.rotation)).collect(),
        })
    }

    pub fn opens_towards(&self, offset: Offset) -> bool {
        self.connections.contains(&offset)
    }
}

/// Ordered by cell so iteration, and therefore seeded random picks, are
/// reproducible.
#[derive(Resource, Debug, Default, Clone)]
pub struct RoadGraph {
    nodes: BTreeMap<GridPos, RoadNode>,
}

impl RoadGraph {
    pub fn from_buildings<'a>(buildings: impl IntoIterator<Item = &'a Building>) -> Self {
        let mut graph = Self::default();
        graph.rebuild(buildings);
        graph
    }

    /// Discard every node and derive the graph again.
    pub fn rebuild<'a>(&mut self, buildings: impl IntoIterator<Item = &'a Building>) {
        self.nodes.clear();
        for building in buildings {
            if let Some(node) = RoadNode::from_building(building) {
                self.nodes.insert(node.pos, node);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, pos: GridPos) -> Option<&RoadNode> {
        self.nodes.get(&pos)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &RoadNode> {
        self.nodes.values()
    }

    /// An edge is drivable only when both endpoints declare it.
    pub fn is_reciprocal(&self, from: GridPos, offset: Offset) -> bool {
        let Some(a) = self.nodes.get(&from) else {
            return false;
        };
        let Some(b) = self.nodes.get(&offset.apply(from)) else {
            return false;
        };
        a.opens_towards(offset) && b.opens_towards(offset.reversed())
    }

    /// Neighbours reachable over mutually declared edges, in connection order.
    pub fn reciprocal_neighbors(&self, pos: GridPos) -> Vec<GridPos> {
        let Some(node) = self.nodes.get(&pos) else {
            return Vec::new();
        };
        node.connections
            .iter()
            .filter(|&&offset| self.is_reciprocal(pos, offset))
            .map(|offset| offset.apply(pos))
            .collect()
    }

    pub fn random_node(&self, rng: &mut impl Rng) -> Option<GridPos> {
        if self.nodes.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.nodes.len());
        self.nodes.keys().nth(index).copied()
    }

    /// Bounded random walk from `start`.
    ///
    /// Each step picks uniformly among reciprocal neighbours not already on
    /// the path; the walk stops early when none is left. The result always
    /// starts with `start` and holds at most `max_hops + 1` cells. Empty when
    /// `start` is not a road node.
    pub fn generate_random_path(
        &self,
        start: GridPos,
        max_hops: usize,
        rng: &mut impl Rng,
    ) -> Vec<GridPos> {
        if !self.nodes.contains_key(&start) {
            return Vec::new();
        }
        let mut path = vec![start];
        let mut current = start;
        for _ in 0..max_hops {
            let candidates: Vec<GridPos> = self
                .reciprocal_neighbors(current)
                .into_iter()
                .filter(|p| !path.contains(p))
                .collect();
            if candidates.is_empty() {
                break;
            }
            current = candidates[rng.gen_range(0..candidates.len())];
            path.push(current);
        }
        path
    }
}

pub fn rebuild_road_graph(city: Res<CityBuildings>, mut graph: ResMut<RoadGraph>) {
    if !city.is_changed() {
        return;
    }
    graph.rebuild(city.iter());
    debug!(
        "Road graph rebuilt: {} nodes from {} buildings",
        graph.len(),
        city.len()
    );
}
