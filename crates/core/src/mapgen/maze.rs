//! Perfect-maze carving by randomized backtracking with a straight-ahead bias.
//! The backtracker runs on an explicit frame stack so large grids cannot exhaust the call stack.

use crate::grid::Grid;
use crate::types::{Cell, Direction, Pos};

use super::seed::{DungeonRng, random_range, roll_percent, shuffle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct MazeOutcome {
    pub(super) spawn: Pos,
    pub(super) corridor_cells: usize,
}

/// One pending visit: the lattice cell to carve and the direction it is entered from.
#[derive(Clone, Copy, Debug)]
struct Frame {
    cell: Pos,
    from: Direction,
}

/// Picks an entrance on a random border side and carves the maze from the cell just inside it.
pub(super) fn carve_maze(
    grid: &mut Grid,
    rng: &mut DungeonRng,
    straight_bias_percent: u32,
) -> MazeOutcome {
    let side = Direction::ALL[random_range(rng, 0, Direction::ALL.len() as i32) as usize];
    let spawn = entrance_cell(grid, rng, side);
    let start = side.opposite().step(spawn, 1);
    let corridor_cells = carve_from(grid, rng, start, side, straight_bias_percent);
    MazeOutcome { spawn, corridor_cells }
}

fn entrance_cell(grid: &Grid, rng: &mut DungeonRng, side: Direction) -> Pos {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    match side {
        Direction::Left => Pos { y: odd_coordinate(rng, height), x: 0 },
        Direction::Right => Pos { y: odd_coordinate(rng, height), x: width - 1 },
        Direction::Up => Pos { y: 0, x: odd_coordinate(rng, width) },
        Direction::Down => Pos { y: height - 1, x: odd_coordinate(rng, width) },
    }
}

fn odd_coordinate(rng: &mut DungeonRng, extent: i32) -> i32 {
    let value = random_range(rng, 1, extent - 2);
    if value % 2 == 0 { value - 1 } else { value }
}

/// Carves from `start` and returns how many cells were opened.
///
/// Frames are pushed in reverse priority so they pop in exactly the order the recursive
/// formulation would visit them. Validity is checked on pop, when the visit would happen.
pub(super) fn carve_from(
    grid: &mut Grid,
    rng: &mut DungeonRng,
    start: Pos,
    from: Direction,
    straight_bias_percent: u32,
) -> usize {
    let mut corridor_cells = 0;
    let mut frames = vec![Frame { cell: start, from }];

    while let Some(Frame { cell, from }) = frames.pop() {
        if !can_carve(grid, cell) {
            continue;
        }

        grid.set(from.step(cell, 1), Cell::Floor);
        grid.set(cell, Cell::Floor);
        corridor_cells += 2;

        let mut directions = Direction::ALL;
        shuffle(rng, &mut directions);
        let straight = from.opposite();
        let straight_first = roll_percent(rng) < straight_bias_percent;

        let mut children = Vec::with_capacity(Direction::ALL.len());
        if straight_first {
            children.push(Frame { cell: straight.step(cell, 2), from });
        }
        for direction in directions {
            if direction == from || (straight_first && direction == straight) {
                continue;
            }
            children.push(Frame { cell: direction.step(cell, 2), from: direction.opposite() });
        }
        frames.extend(children.into_iter().rev());
    }

    corridor_cells
}

/// A lattice cell may be carved only if it is inside the grid and none of its four neighbours
/// is already open, which keeps corridors from touching each other or rooms.
fn can_carve(grid: &Grid, cell: Pos) -> bool {
    grid.in_bounds(cell) && grid.open_neighbor_count(cell) == 0
}
