//! Seeded simulation RNG.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Resource)]
pub struct SimRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::new(0x5eed)
    }
}
