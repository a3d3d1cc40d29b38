//! Dead-end pruning and wall braiding applied to the freshly carved maze.
//! Pruning always runs before braiding so that loops are cut into the trimmed topology.

use std::collections::VecDeque;

use crate::grid::Grid;
use crate::types::{Cell, Direction, Pos};

use super::seed::{DungeonRng, random_index};

/// An open cell other than the spawn with exactly one open neighbour.
pub(super) fn is_dead_end(grid: &Grid, spawn: Pos, pos: Pos) -> bool {
    pos != spawn && grid.is_open(pos) && grid.open_neighbor_count(pos) == 1
}

/// Walls up dead ends until `corridor_cells` drops to `corridors_to_leave` or no dead end is
/// left. Returns how many cells were removed.
pub(super) fn remove_dead_ends(
    grid: &mut Grid,
    spawn: Pos,
    corridor_cells: &mut usize,
    corridors_to_leave: usize,
) -> usize {
    let mut dead_ends: VecDeque<Pos> =
        grid.positions().filter(|&pos| is_dead_end(grid, spawn, pos)).collect();
    let mut removed = 0;

    while *corridor_cells > corridors_to_leave {
        let Some(pos) = dead_ends.pop_front() else {
            break;
        };
        if !grid.is_open(pos) {
            continue;
        }

        grid.set(pos, Cell::Wall);
        for direction in Direction::ALL {
            let neighbor = direction.step(pos, 1);
            if is_dead_end(grid, spawn, neighbor) {
                dead_ends.push_back(neighbor);
            }
        }
        *corridor_cells = corridor_cells.saturating_sub(1);
        removed += 1;
    }

    removed
}

/// Interior walls with corridor floor on both sides along one axis.
pub(super) fn single_thickness_walls(grid: &Grid) -> Vec<Pos> {
    let mut walls = Vec::new();
    for x in 1..(grid.width() as i32 - 1) {
        for y in 1..(grid.height() as i32 - 1) {
            let pos = Pos { y, x };
            if grid.get(pos) != Cell::Wall {
                continue;
            }
            let horizontal = grid.get(Direction::Left.step(pos, 1)) == Cell::Floor
                && grid.get(Direction::Right.step(pos, 1)) == Cell::Floor;
            let vertical = grid.get(Direction::Up.step(pos, 1)) == Cell::Floor
                && grid.get(Direction::Down.step(pos, 1)) == Cell::Floor;
            if horizontal || vertical {
                walls.push(pos);
            }
        }
    }
    walls
}

/// Knocks out up to `walls_to_remove` separating walls chosen uniformly without replacement.
pub(super) fn break_walls(grid: &mut Grid, rng: &mut DungeonRng, walls_to_remove: usize) -> usize {
    let mut walls = single_thickness_walls(grid);
    let mut broken = 0;
    while broken < walls_to_remove && !walls.is_empty() {
        let pos = walls.swap_remove(random_index(rng, walls.len()));
        grid.set(pos, Cell::Floor);
        broken += 1;
    }
    broken
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::maze::carve_maze;
    use crate::mapgen::seed::rng_from_seed;

    fn corridor_fixture() -> (Grid, Pos) {
        // Spawn at (1, 0) leading into an L-shaped corridor with a spur.
        let mut grid = Grid::new(9, 9);
        let spawn = Pos::new(1, 0);
        for pos in [
            spawn,
            Pos::new(1, 1),
            Pos::new(1, 2),
            Pos::new(1, 3),
            Pos::new(2, 3),
            Pos::new(3, 3),
            Pos::new(3, 4),
            Pos::new(3, 5),
            Pos::new(4, 3),
            Pos::new(5, 3),
        ] {
            grid.set(pos, Cell::Floor);
        }
        (grid, spawn)
    }

    #[test]
    fn spawn_is_never_a_dead_end() {
        let (grid, spawn) = corridor_fixture();
        assert_eq!(grid.open_neighbor_count(spawn), 1);
        assert!(!is_dead_end(&grid, spawn, spawn));
        assert!(is_dead_end(&grid, spawn, Pos::new(3, 5)));
        assert!(is_dead_end(&grid, spawn, Pos::new(5, 3)));
        assert!(!is_dead_end(&grid, spawn, Pos::new(3, 3)));
    }

    #[test]
    fn pruning_stops_at_target_count() {
        let (mut grid, spawn) = corridor_fixture();
        let mut corridor_cells = 10;
        let removed = remove_dead_ends(&mut grid, spawn, &mut corridor_cells, 7);
        assert_eq!(removed, 3);
        assert_eq!(corridor_cells, 7);
        assert_eq!(grid.count(Cell::Floor), 7);
    }

    #[test]
    fn pruning_cascades_but_keeps_spawn() {
        let (mut grid, spawn) = corridor_fixture();
        let mut corridor_cells = 10;
        let removed = remove_dead_ends(&mut grid, spawn, &mut corridor_cells, 0);
        assert_eq!(removed, 9);
        assert_eq!(corridor_cells, 1);
        assert_eq!(grid.get(spawn), Cell::Floor);
        assert_eq!(grid.count(Cell::Floor), 1);
    }

    #[test]
    fn pruning_on_a_real_maze_respects_corridor_budget() {
        let mut grid = Grid::new(41, 41);
        let mut rng = rng_from_seed(17);
        let outcome = carve_maze(&mut grid, &mut rng, 75);
        let mut corridor_cells = outcome.corridor_cells;
        let removed = remove_dead_ends(&mut grid, outcome.spawn, &mut corridor_cells, 300);

        assert_eq!(corridor_cells, 300);
        assert_eq!(removed, outcome.corridor_cells - 300);
        assert_eq!(grid.count(Cell::Floor), 300);
    }

    #[test]
    fn pruning_is_skipped_when_already_under_budget() {
        let (mut grid, spawn) = corridor_fixture();
        let mut corridor_cells = 10;
        assert_eq!(remove_dead_ends(&mut grid, spawn, &mut corridor_cells, 550), 0);
        assert_eq!(grid.count(Cell::Floor), 10);
    }

    #[test]
    fn single_thickness_walls_require_floor_on_both_sides() {
        let mut grid = Grid::new(9, 9);
        grid.set(Pos::new(1, 1), Cell::Floor);
        grid.set(Pos::new(3, 1), Cell::Floor);
        grid.set(Pos::new(5, 3), Cell::Floor);
        grid.set(Pos::new(5, 5), Cell::Floor);
        grid.set(Pos::new(1, 7), Cell::Room);
        grid.set(Pos::new(3, 7), Cell::Floor);

        let walls = single_thickness_walls(&grid);
        assert_eq!(walls, vec![Pos::new(2, 1), Pos::new(5, 4)]);
    }

    #[test]
    fn breaking_walls_opens_requested_count() {
        let mut grid = Grid::new(41, 41);
        let mut rng = rng_from_seed(23);
        carve_maze(&mut grid, &mut rng, 75);
        let before = grid.count(Cell::Floor);
        let candidates = single_thickness_walls(&grid).len();
        assert!(candidates > 10);

        let broken = break_walls(&mut grid, &mut rng, 10);
        assert_eq!(broken, 10);
        assert_eq!(grid.count(Cell::Floor), before + 10);
    }

    #[test]
    fn breaking_walls_is_capped_by_candidates() {
        let mut grid = Grid::new(9, 9);
        grid.set(Pos::new(1, 1), Cell::Floor);
        grid.set(Pos::new(3, 1), Cell::Floor);
        let mut rng = rng_from_seed(1);
        assert_eq!(break_walls(&mut grid, &mut rng, 90), 1);
        assert_eq!(grid.get(Pos::new(2, 1)), Cell::Floor);
    }
}
