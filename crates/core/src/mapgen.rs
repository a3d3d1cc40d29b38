//! Procedural dungeon generation split into one submodule per phase.

pub mod model;

mod connectors;
mod generator;
mod maze;
mod prune;
mod rooms;
mod seed;

pub use generator::MapGenerator;
pub use model::{GeneratedDungeon, GenerationStats, Room};
pub use seed::{DungeonRng, rng_from_seed};

use crate::config::DungeonConfig;

pub fn generate_dungeon(config: &DungeonConfig, seed: u64) -> GeneratedDungeon {
    MapGenerator::new(config).generate(&mut rng_from_seed(seed))
}
