//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating hand-built dungeon layouts across many tests.
//! It does not own production gameplay logic.

use super::*;
use crate::mapgen::{GeneratedDungeon, GenerationStats};

/// A grid that is floor everywhere, with the origin at its centre.
pub(crate) fn open_field(width: usize, height: usize) -> (Grid, Pos) {
    let mut grid = Grid::new(width, height);
    for pos in grid.positions().collect::<Vec<_>>() {
        grid.set(pos, Cell::Floor);
    }
    let origin = Pos::new(grid.width() as i32 / 2, grid.height() as i32 / 2);
    (grid, origin)
}

/// Horizontal corridor along y = 5 from x = 1 to x = 11 with a closed door at x = 6.
/// The player starts at (3, 5).
pub(crate) fn door_corridor() -> (GeneratedDungeon, Pos) {
    let mut grid = Grid::new(13, 11);
    for x in 1..=11 {
        grid.set(Pos::new(x, 5), Cell::Floor);
    }
    let door = Pos::new(6, 5);
    let generated = GeneratedDungeon {
        grid,
        spawn: Pos::new(3, 5),
        rooms: Vec::new(),
        doors: vec![Door::new(door)],
        stats: GenerationStats::default(),
    };
    (generated, door)
}

pub(crate) fn test_config() -> DungeonConfig {
    DungeonConfig { sight_radius: 5.5, ticks_for_door_to_close: 5, ..DungeonConfig::default() }
}

pub(crate) fn corridor_dungeon() -> (Dungeon, Pos) {
    let (generated, door) = door_corridor();
    (Dungeon::from_generated(test_config(), 0, generated), door)
}
