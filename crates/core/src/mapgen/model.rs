//! Public data models for generated dungeons.

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::entity::Door;
use crate::grid::Grid;
use crate::types::{Cell, Pos};

/// A placed rectangle. Rooms left without any connector are marked invalid and filled with wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub valid: bool,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height, valid: true }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x <= self.right() && pos.y >= self.y && pos.y <= self.bottom()
    }

    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (self.x..=self.right()).flat_map(move |x| (self.y..=self.bottom()).map(move |y| Pos { y, x }))
    }

    /// Whether this room, grown by `margin` cells on every side, shares any cell with `other`.
    pub fn overlaps_with_margin(&self, other: &Room, margin: i32) -> bool {
        self.x - margin <= other.right()
            && self.right() + margin >= other.x
            && self.y - margin <= other.bottom()
            && self.bottom() + margin >= other.y
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub rooms_requested: usize,
    pub rooms_placed: usize,
    pub rooms_invalid: usize,
    pub rooms_sealed: usize,
    pub corridor_cells_carved: usize,
    pub corridor_cells_left: usize,
    pub dead_ends_pruned: usize,
    pub walls_broken: usize,
    pub doors_placed: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedDungeon {
    pub grid: Grid,
    pub spawn: Pos,
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    pub stats: GenerationStats,
}

impl GeneratedDungeon {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.grid.cells().len() + 64);
        bytes.extend((self.grid.width() as u32).to_le_bytes());
        bytes.extend((self.grid.height() as u32).to_le_bytes());
        for cell in self.grid.cells() {
            bytes.push(match cell {
                Cell::Wall => 0,
                Cell::Floor => 1,
                Cell::Room => 2,
                Cell::OutOfRange => 3,
            });
        }
        bytes.extend(self.spawn.y.to_le_bytes());
        bytes.extend(self.spawn.x.to_le_bytes());

        bytes.extend((self.doors.len() as u32).to_le_bytes());
        for door in &self.doors {
            bytes.extend(door.pos.y.to_le_bytes());
            bytes.extend(door.pos.x.to_le_bytes());
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
