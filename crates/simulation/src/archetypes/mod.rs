//! Closed catalog of everything that can be placed on the grid or driven on it.
//!
//! Building records carry their archetype as a string key on the wire; the
//! rest of the crate works with [`BuildingArchetype`] so every capability
//! lookup is an exhaustive `match`.

mod vehicles;

#[cfg(test)]
mod tests;

pub use vehicles::VehicleArchetype;

use serde::{Deserialize, Serialize};

use crate::grid::Offset;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchetypeError {
    Unknown(String),
}

impl std::fmt::Display for ArchetypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchetypeError::Unknown(key) => write!(f, "unknown archetype '{key}'"),
        }
    }
}

impl std::error::Error for ArchetypeError {}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingCategory {
    Construction,
    Nature,
    Infrastructure,
    Special,
}

impl BuildingCategory {
    pub const ALL: [BuildingCategory; 4] = [
        Self::Construction,
        Self::Nature,
        Self::Infrastructure,
        Self::Special,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Construction => "Construction",
            Self::Nature => "Nature",
            Self::Infrastructure => "Infrastructure",
            Self::Special => "Special",
        }
    }
}

// ---------------------------------------------------------------------------
// Road connectivity patterns (unrotated)
// ---------------------------------------------------------------------------

const STRAIGHT: &[Offset] = &[Offset::WEST, Offset::EAST];
const CORNER: &[Offset] = &[Offset::WEST, Offset::SOUTH];
const FOUR_WAY: &[Offset] = &[Offset::WEST, Offset::EAST, Offset::NORTH, Offset::SOUTH];
const T_SPLIT: &[Offset] = &[Offset::WEST, Offset::SOUTH, Offset::NORTH];
const DEAD_END: &[Offset] = &[Offset::WEST];

// ---------------------------------------------------------------------------
// Building archetypes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuildingArchetype {
    // construction
    House,
    School,
    PowerPlant,
    BuildingA,
    BuildingB,
    BuildingC,
    BuildingD,
    BuildingTypeA,
    BuildingTypeB,
    LowDetailBuildingA,
    SkyscraperA,
    SkyscraperB,
    // nature
    Park,
    TreeLarge,
    TreeSmall,
    Planter,
    // infrastructure
    RoadStraight,
    RoadCurve,
    RoadCrossroad,
    RoadBend,
    RoadIntersection,
    RoadSplit,
    RoadSide,
    RoadDrivewaySingle,
    RoadDrivewayDouble,
    RoadEnd,
    RoadEndRound,
    RoadSquare,
    PathLong,
    Fence,
    // special
    Mission,
}

impl BuildingArchetype {
    pub const ALL: &'static [BuildingArchetype] = &[
        Self::House,
        Self::School,
        Self::PowerPlant,
        Self::BuildingA,
        Self::BuildingB,
        Self::BuildingC,
        Self::BuildingD,
        Self::BuildingTypeA,
        Self::BuildingTypeB,
        Self::LowDetailBuildingA,
        Self::SkyscraperA,
        Self::SkyscraperB,
        Self::Park,
        Self::TreeLarge,
        Self::TreeSmall,
        Self::Planter,
        Self::RoadStraight,
        Self::RoadCurve,
        Self::RoadCrossroad,
        Self::RoadBend,
        Self::RoadIntersection,
        Self::RoadSplit,
        Self::RoadSide,
        Self::RoadDrivewaySingle,
        Self::RoadDrivewayDouble,
        Self::RoadEnd,
        Self::RoadEndRound,
        Self::RoadSquare,
        Self::PathLong,
        Self::Fence,
        Self::Mission,
    ];

    /// Wire key stored in building records.
    pub fn key(self) -> &'static str {
        match self {
            Self::House => "house",
            Self::School => "school",
            Self::PowerPlant => "power",
            Self::BuildingA => "building_a",
            Self::BuildingB => "building_b",
            Self::BuildingC => "building_c",
            Self::BuildingD => "building_d",
            Self::BuildingTypeA => "building_type_a",
            Self::BuildingTypeB => "building_type_b",
            Self::LowDetailBuildingA => "low_detail_building_a",
            Self::SkyscraperA => "building_skyscraper_a",
            Self::SkyscraperB => "building_skyscraper_b",
            Self::Park => "park",
            Self::TreeLarge => "tree_large",
            Self::TreeSmall => "tree_small",
            Self::Planter => "planter",
            Self::RoadStraight => "road_straight",
            Self::RoadCurve => "road_curve",
            Self::RoadCrossroad => "road_crossroad",
            Self::RoadBend => "road_bend",
            Self::RoadIntersection => "road_intersection",
            Self::RoadSplit => "road_split",
            Self::RoadSide => "road_side",
            Self::RoadDrivewaySingle => "road_driveway_single",
            Self::RoadDrivewayDouble => "road_driveway_double",
            Self::RoadEnd => "road_end",
            Self::RoadEndRound => "road_end_round",
            Self::RoadSquare => "road_square",
            Self::PathLong => "path_long",
            Self::Fence => "fence",
            Self::Mission => "missao",
        }
    }

    pub fn from_key(key: &str) -> Result<Self, ArchetypeError> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.key() == key)
            .ok_or_else(|| ArchetypeError::Unknown(key.to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::House => "House",
            Self::School => "School",
            Self::PowerPlant => "Power Plant",
            Self::BuildingA => "Building A",
            Self::BuildingB => "Building B",
            Self::BuildingC => "Building C",
            Self::BuildingD => "Building D",
            Self::BuildingTypeA => "Suburban House A",
            Self::BuildingTypeB => "Suburban House B",
            Self::LowDetailBuildingA => "Low Building A",
            Self::SkyscraperA => "Skyscraper A",
            Self::SkyscraperB => "Skyscraper B",
            Self::Park => "Park",
            Self::TreeLarge => "Tree Large",
            Self::TreeSmall => "Tree Small",
            Self::Planter => "Planter",
            Self::RoadStraight => "Road Straight",
            Self::RoadCurve => "Road Curve",
            Self::RoadCrossroad => "Road Crossroad",
            Self::RoadBend => "Road Bend",
            Self::RoadIntersection => "Road Intersection",
            Self::RoadSplit => "Road Split",
            Self::RoadSide => "Road Side",
            Self::RoadDrivewaySingle => "Driveway Single",
            Self::RoadDrivewayDouble => "Driveway Double",
            Self::RoadEnd => "Road End",
            Self::RoadEndRound => "Road End Round",
            Self::RoadSquare => "Road Square",
            Self::PathLong => "Path",
            Self::Fence => "Fence",
            Self::Mission => "Mission",
        }
    }

    pub fn category(self) -> BuildingCategory {
        match self {
            Self::House
            | Self::School
            | Self::PowerPlant
            | Self::BuildingA
            | Self::BuildingB
            | Self::BuildingC
            | Self::BuildingD
            | Self::BuildingTypeA
            | Self::BuildingTypeB
            | Self::LowDetailBuildingA
            | Self::SkyscraperA
            | Self::SkyscraperB => BuildingCategory::Construction,
            Self::Park | Self::TreeLarge | Self::TreeSmall | Self::Planter => {
                BuildingCategory::Nature
            }
            Self::RoadStraight
            | Self::RoadCurve
            | Self::RoadCrossroad
            | Self::RoadBend
            | Self::RoadIntersection
            | Self::RoadSplit
            | Self::RoadSide
            | Self::RoadDrivewaySingle
            | Self::RoadDrivewayDouble
            | Self::RoadEnd
            | Self::RoadEndRound
            | Self::RoadSquare
            | Self::PathLong
            | Self::Fence => BuildingCategory::Infrastructure,
            Self::Mission => BuildingCategory::Special,
        }
    }

    /// Price shown in the build palette. Not charged by the core.
    pub fn cost(self) -> u32 {
        match self {
            Self::TreeLarge | Self::TreeSmall => 25,
            Self::Mission => 1000,
            _ => match self.category() {
                BuildingCategory::Infrastructure => 1,
                _ => 10,
            },
        }
    }

    /// Uniform world scale applied to the model.
    pub fn scale(self) -> f32 {
        2.0
    }

    /// glTF model under `assets/`, or `None` for archetypes that are always
    /// drawn as a placeholder block.
    pub fn model_path(self) -> Option<&'static str> {
        let path = match self {
            Self::House | Self::School | Self::PowerPlant | Self::Park => return None,
            Self::BuildingA => "models/building-a.glb",
            Self::BuildingB => "models/building-b.glb",
            Self::BuildingC => "models/building-c.glb",
            Self::BuildingD => "models/building-d.glb",
            Self::BuildingTypeA => "models/suburban/building-type-a.glb",
            Self::BuildingTypeB => "models/suburban/building-type-b.glb",
            Self::LowDetailBuildingA => "models/low-detail-building-a.glb",
            Self::SkyscraperA => "models/building-skyscraper-a.glb",
            Self::SkyscraperB => "models/building-skyscraper-b.glb",
            Self::TreeLarge => "models/suburban/tree-large.glb",
            Self::TreeSmall => "models/suburban/tree-small.glb",
            Self::Planter => "models/suburban/planter.glb",
            Self::RoadStraight => "models/infra/road-straight.glb",
            Self::RoadCurve => "models/infra/road-curve.glb",
            Self::RoadCrossroad => "models/infra/road-crossroad.glb",
            Self::RoadBend => "models/infra/road-bend.glb",
            Self::RoadIntersection => "models/infra/road-intersection.glb",
            Self::RoadSplit => "models/infra/road-split.glb",
            Self::RoadSide => "models/infra/road-side.glb",
            Self::RoadDrivewaySingle => "models/infra/road-driveway-single.glb",
            Self::RoadDrivewayDouble => "models/infra/road-driveway-double.glb",
            Self::RoadEnd => "models/infra/road-end.glb",
            Self::RoadEndRound => "models/infra/road-end-round.glb",
            Self::RoadSquare => "models/infra/road-square.glb",
            Self::PathLong => "models/suburban/path-long.glb",
            Self::Fence => "models/suburban/fence.glb",
            Self::Mission => "models/special/missao.glb",
        };
        Some(path)
    }

    /// Base connectivity in the unrotated orientation. `None` for anything
    /// vehicles cannot drive on.
    pub fn road_connectivity(self) -> Option<&'static [Offset]> {
        match self {
            Self::RoadStraight | Self::RoadSide => Some(STRAIGHT),
            Self::RoadCurve
            | Self::RoadBend
            | Self::RoadDrivewaySingle
            | Self::RoadDrivewayDouble => Some(CORNER),
            Self::RoadCrossroad | Self::RoadIntersection => Some(FOUR_WAY),
            Self::RoadSplit => Some(T_SPLIT),
            Self::RoadEnd | Self::RoadEndRound => Some(DEAD_END),
            _ => None,
        }
    }

    pub fn is_road(self) -> bool {
        self.road_connectivity().is_some()
    }

    pub fn in_category(category: BuildingCategory) -> impl Iterator<Item = BuildingArchetype> {
        Self::ALL
            .iter()
            .copied()
            .filter(move |a| a.category() == category)
    }
}

impl std::fmt::Display for BuildingArchetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for BuildingArchetype {
    type Err = ArchetypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}
