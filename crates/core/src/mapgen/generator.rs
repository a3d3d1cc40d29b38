//! High-level dungeon generation orchestration: rooms, maze, pruning, braiding, then doors.

use log::{debug, info};

use crate::config::DungeonConfig;
use crate::entity::Door;
use crate::grid::Grid;

use super::connectors::{DoorDivisors, connect_rooms, seal_unreachable};
use super::maze::carve_maze;
use super::model::{GeneratedDungeon, GenerationStats};
use super::prune::{break_walls, remove_dead_ends};
use super::rooms::place_rooms;
use super::seed::DungeonRng;

pub struct MapGenerator {
    config: DungeonConfig,
}

impl MapGenerator {
    pub fn new(config: &DungeonConfig) -> Self {
        Self { config: config.clone() }
    }

    /// Runs every phase in order against one grid. Never fails: undersized or contradictory
    /// settings only yield fewer rooms.
    pub fn generate(&self, rng: &mut DungeonRng) -> GeneratedDungeon {
        let config = &self.config;
        let mut grid = Grid::new(config.width, config.height);

        let mut rooms = place_rooms(&mut grid, rng, config.room_count, config.room_attempts);
        debug!("placed {} of {} rooms", rooms.len(), config.room_count);

        let maze = carve_maze(&mut grid, rng, config.straight_bias_percent);
        debug!("carved {} corridor cells from spawn {:?}", maze.corridor_cells, maze.spawn);

        let mut corridor_cells = maze.corridor_cells;
        let dead_ends_pruned =
            remove_dead_ends(&mut grid, maze.spawn, &mut corridor_cells, config.corridors_to_leave);
        debug!("pruned {dead_ends_pruned} dead-end cells, {corridor_cells} corridor cells left");

        let walls_broken = break_walls(&mut grid, rng, config.walls_to_remove);
        debug!("broke {walls_broken} walls");

        let divisors = DoorDivisors {
            corridor: config.corridor_door_divisor,
            room: config.room_door_divisor,
        };
        let mut door_cells = connect_rooms(&mut grid, rng, &mut rooms, divisors);
        let rooms_invalid = rooms.iter().filter(|room| !room.valid).count();
        let rooms_sealed = seal_unreachable(&mut grid, maze.spawn, &mut rooms, &mut door_cells);
        if rooms_sealed > 0 {
            debug!("sealed {rooms_sealed} rooms unreachable from spawn");
        }

        let stats = GenerationStats {
            rooms_requested: config.room_count,
            rooms_placed: rooms.len(),
            rooms_invalid,
            rooms_sealed,
            corridor_cells_carved: maze.corridor_cells,
            corridor_cells_left: corridor_cells,
            dead_ends_pruned,
            walls_broken,
            doors_placed: door_cells.len(),
        };
        info!(
            "generated {}x{} dungeon: {} rooms ({} invalid, {} sealed), {} doors",
            grid.width(),
            grid.height(),
            stats.rooms_placed,
            stats.rooms_invalid,
            stats.rooms_sealed,
            stats.doors_placed
        );

        GeneratedDungeon {
            grid,
            spawn: maze.spawn,
            rooms,
            doors: door_cells.into_iter().map(Door::new).collect(),
            stats,
        }
    }
}
