//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from movement and visibility code.
//! It does not own generation fingerprints; those live with the generated layout.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Dungeon {
    /// Hashes everything a move can change: tick, player position, door states, and discovery.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_i32(self.player.pos.x);
        hasher.write_i32(self.player.pos.y);
        for door in self.doors() {
            hasher.write_i32(door.pos.x);
            hasher.write_i32(door.pos.y);
            hasher.write_u8(u8::from(door.is_open()));
            hasher.write_u64(door.opened_on_tick());
        }
        for &seen in self.discovered.as_slice() {
            hasher.write_u8(u8::from(seen));
        }
        hasher.finish()
    }
}
