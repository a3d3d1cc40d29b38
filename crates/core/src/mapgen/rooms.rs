//! Random placement of non-overlapping rectangular rooms on the odd-coordinate lattice.

use crate::grid::Grid;
use crate::types::{Cell, Pos};

use super::model::Room;
use super::seed::{DungeonRng, random_range};

const MIN_ROOM_WIDTH: i32 = 5;
const MAX_ROOM_WIDTH: i32 = 12;
const MIN_ROOM_HEIGHT: i32 = 3;
const MAX_ROOM_HEIGHT: i32 = 6;
const BORDER_MARGIN: i32 = 3;

/// Tries to place `room_count` rooms, giving each `attempts` tries. Rooms that never fit are
/// skipped, so fewer rooms than requested is a normal outcome.
pub(super) fn place_rooms(
    grid: &mut Grid,
    rng: &mut DungeonRng,
    room_count: usize,
    attempts: usize,
) -> Vec<Room> {
    let grid_width = grid.width() as i32;
    let grid_height = grid.height() as i32;
    let mut rooms = Vec::with_capacity(room_count);

    for _ in 0..room_count {
        for _ in 0..attempts {
            let mut width = random_range(rng, MIN_ROOM_WIDTH, MAX_ROOM_WIDTH);
            let mut height = random_range(rng, MIN_ROOM_HEIGHT, MAX_ROOM_HEIGHT);
            let max_x = grid_width - width - BORDER_MARGIN;
            let max_y = grid_height - height - BORDER_MARGIN;
            if max_x <= BORDER_MARGIN || max_y <= BORDER_MARGIN {
                continue;
            }

            let mut x = random_range(rng, BORDER_MARGIN, max_x);
            let mut y = random_range(rng, BORDER_MARGIN, max_y);
            if x % 2 == 0 {
                x -= 1;
            }
            if y % 2 == 0 {
                y -= 1;
            }
            if width % 2 == 0 {
                width -= 1;
            }
            if height % 2 == 0 {
                height -= 1;
            }

            let candidate = Room::new(x, y, width, height);
            if is_area_clear(grid, &candidate) {
                fill_room(grid, &candidate, Cell::Room);
                rooms.push(candidate);
                break;
            }
        }
    }

    rooms
}

/// The room grown by one cell on every side must not touch carved space.
fn is_area_clear(grid: &Grid, room: &Room) -> bool {
    for x in (room.x - 1)..=(room.right() + 1) {
        for y in (room.y - 1)..=(room.bottom() + 1) {
            if grid.is_open(Pos { y, x }) {
                return false;
            }
        }
    }
    true
}

pub(super) fn fill_room(grid: &mut Grid, room: &Room, cell: Cell) {
    for pos in room.cells() {
        grid.set(pos, cell);
    }
}
