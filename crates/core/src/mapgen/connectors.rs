//! Door placement between rooms and the surrounding corridors, followed by resolving every room
//! placeholder into floor or wall.

use std::collections::{BTreeSet, VecDeque};

use crate::grid::Grid;
use crate::types::{Cell, Direction, Pos};

use super::model::Room;
use super::rooms::fill_room;
use super::seed::{DungeonRng, random_index};

/// Wall cells around one room that could become doors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct ConnectorScan {
    pub(super) room_to_corridor: Vec<Pos>,
    pub(super) room_to_room: Vec<Pos>,
}

impl ConnectorScan {
    pub(super) fn is_empty(&self) -> bool {
        self.room_to_corridor.is_empty() && self.room_to_room.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct DoorDivisors {
    pub(super) corridor: usize,
    pub(super) room: usize,
}

/// Checks every wall cell on the room border. A wall qualifies when the cell just inside and the
/// cell just outside are both open.
pub(super) fn scan_connectors(grid: &Grid, room: &Room) -> ConnectorScan {
    let mut scan = ConnectorScan::default();

    for y in room.y..=room.bottom() {
        classify(grid, &mut scan, Pos { y, x: room.x }, Direction::Left);
        classify(grid, &mut scan, Pos { y, x: room.right() }, Direction::Right);
    }
    for x in room.x..=room.right() {
        classify(grid, &mut scan, Pos { y: room.y, x }, Direction::Up);
        classify(grid, &mut scan, Pos { y: room.bottom(), x }, Direction::Down);
    }

    scan
}

fn classify(grid: &Grid, scan: &mut ConnectorScan, inner: Pos, outward: Direction) {
    let wall = outward.step(inner, 1);
    let outer = outward.step(inner, 2);
    if !grid.is_open(inner) || !grid.is_open(outer) {
        return;
    }
    if grid.get(inner) == Cell::Room && grid.get(outer) == Cell::Room {
        scan.room_to_room.push(wall);
    } else {
        scan.room_to_corridor.push(wall);
    }
}

/// Opens doors for every room and returns their positions, each at most once. Rooms with no
/// connector at all are flagged invalid. Placeholders are resolved afterwards.
pub(super) fn connect_rooms(
    grid: &mut Grid,
    rng: &mut DungeonRng,
    rooms: &mut [Room],
    divisors: DoorDivisors,
) -> Vec<Pos> {
    let mut doors = Vec::new();

    for room in rooms.iter_mut() {
        let scan = scan_connectors(grid, room);
        room.valid = !scan.is_empty();

        let picked = pick_doors(rng, scan.room_to_corridor, divisors.corridor)
            .into_iter()
            .chain(pick_doors(rng, scan.room_to_room, divisors.room));
        for pos in picked {
            grid.set(pos, Cell::Floor);
            if !doors.contains(&pos) {
                doors.push(pos);
            }
        }
    }

    for room in rooms.iter() {
        fill_room(grid, room, if room.valid { Cell::Floor } else { Cell::Wall });
    }

    doors
}

/// Chooses `max(1, candidates / divisor)` connectors uniformly without replacement, or none when
/// there are no candidates.
fn pick_doors(rng: &mut DungeonRng, mut candidates: Vec<Pos>, divisor: usize) -> Vec<Pos> {
    if candidates.is_empty() {
        return Vec::new();
    }
    let wanted = (candidates.len() / divisor.max(1)).max(1);
    let mut picked = Vec::with_capacity(wanted);
    while picked.len() < wanted && !candidates.is_empty() {
        picked.push(candidates.swap_remove(random_index(rng, candidates.len())));
    }
    picked
}

/// Walls up every floor cell the spawn cannot reach, marking the rooms they belonged to invalid
/// and dropping doors that led into them. Returns how many rooms were sealed.
pub(super) fn seal_unreachable(
    grid: &mut Grid,
    spawn: Pos,
    rooms: &mut [Room],
    doors: &mut Vec<Pos>,
) -> usize {
    let reachable = reachable_from(grid, spawn);

    let mut sealed = 0;
    for room in rooms.iter_mut().filter(|room| room.valid) {
        if !reachable.contains(&Pos { y: room.y, x: room.x }) {
            room.valid = false;
            sealed += 1;
        }
    }

    let unreachable: Vec<Pos> =
        grid.positions().filter(|pos| grid.is_open(*pos) && !reachable.contains(pos)).collect();
    for pos in unreachable {
        grid.set(pos, Cell::Wall);
    }
    doors.retain(|pos| reachable.contains(pos));

    sealed
}

pub(crate) fn reachable_from(grid: &Grid, start: Pos) -> BTreeSet<Pos> {
    let mut seen = BTreeSet::new();
    if !grid.is_open(start) {
        return seen;
    }
    seen.insert(start);
    let mut open = VecDeque::from([start]);
    while let Some(pos) = open.pop_front() {
        for direction in Direction::ALL {
            let next = direction.step(pos, 1);
            if grid.is_open(next) && seen.insert(next) {
                open.push_back(next);
            }
        }
    }
    seen
}
