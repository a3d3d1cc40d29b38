//! Seeded random stream helpers shared by every generation phase.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// The generator threaded explicitly through generation so runs are reproducible per seed.
pub type DungeonRng = ChaCha8Rng;

pub fn rng_from_seed(seed: u64) -> DungeonRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform value in `min..max`. An empty range yields `min`.
pub(crate) fn random_range(rng: &mut DungeonRng, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    let span = (max - min) as u64;
    min + (rng.next_u64() % span) as i32
}

pub(crate) fn random_index(rng: &mut DungeonRng, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

/// Roll in `0..100`.
pub(crate) fn roll_percent(rng: &mut DungeonRng) -> u32 {
    (rng.next_u64() % 100) as u32
}

pub(crate) fn shuffle<T>(rng: &mut DungeonRng, items: &mut [T]) {
    for upper in (1..items.len()).rev() {
        let swap_with = random_index(rng, upper + 1);
        items.swap(upper, swap_with);
    }
}
