//! Seeded RNG shared by everything random in the city: spawn points,
//! walk choices, hop intervals and vehicle models.
//!
//! `ChaCha8Rng` gives the same stream on every platform, so a seed fully
//! determines the traffic a city produces.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::DEFAULT_SEED;

#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_SEED)
    }
}

/// Registers a `DEFAULT_SEED` rng; a `SimRng` inserted earlier by the host wins.
pub struct SimRngPlugin;

impl Plugin for SimRngPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimRng>();
    }
}
