use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Random source for flicker duration sampling.
///
/// Seeded from entropy by default. Pass a seed (e.g. `--seed 42`) to get a
/// reproducible flicker pattern.
#[derive(Resource)]
pub struct FlickerRng(pub StdRng);

impl Default for FlickerRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl FlickerRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}
