pub mod config;
pub mod entity;
pub mod game;
pub mod grid;
pub mod mapgen;
pub mod types;

pub use config::{ConfigError, DungeonConfig};
pub use entity::{Door, Entity, Player};
pub use game::{DiscoveredCells, Dungeon};
pub use grid::Grid;
pub use mapgen::{GeneratedDungeon, GenerationStats, MapGenerator, Room, generate_dungeon};
pub use types::*;
