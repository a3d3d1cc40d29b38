use std::collections::{BTreeSet, VecDeque};

use anyhow::{Result, ensure};
use clap::Parser;
use delve_core::{Cell, Direction, Dungeon, DungeonConfig, Grid, Pos};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of consecutive seeds to check
    #[arg(short, long, default_value_t = 20)]
    runs: u64,
    #[arg(short, long, default_value_t = 1000)]
    moves: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn reachable_floor(grid: &Grid, start: Pos) -> usize {
    let mut seen = BTreeSet::from([start]);
    let mut open = VecDeque::from([start]);
    while let Some(pos) = open.pop_front() {
        for direction in Direction::ALL {
            let next = direction.step(pos, 1);
            if grid.get(next) == Cell::Floor && seen.insert(next) {
                open.push_back(next);
            }
        }
    }
    seen.len()
}

fn check_layout(dungeon: &Dungeon) -> Result<()> {
    let grid = dungeon.grid();
    ensure!(grid.width() % 2 == 1 && grid.height() % 2 == 1, "Invariant failed: even dimensions");
    ensure!(grid.count(Cell::Room) == 0, "Invariant failed: room placeholder left in grid");
    ensure!(
        reachable_floor(grid, dungeon.spawn()) == grid.count(Cell::Floor),
        "Invariant failed: floor unreachable from spawn"
    );
    for (index, left) in dungeon.rooms().iter().enumerate() {
        for right in &dungeon.rooms()[index + 1..] {
            ensure!(!left.overlaps_with_margin(right, 1), "Invariant failed: rooms touch");
        }
    }
    Ok(())
}

fn run(seed: u64, moves: u32) -> Result<()> {
    let mut dungeon = Dungeon::new(DungeonConfig::default(), seed);
    check_layout(&dungeon)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let timeout = dungeon.config().ticks_for_door_to_close;

    for _ in 0..moves {
        let discovered_before = dungeon.discovered().count();
        dungeon.move_player(choose(&mut rng, &Direction::ALL));

        let player = dungeon.player_pos();
        ensure!(dungeon.cell_at(player) == Cell::Floor, "Invariant failed: player inside wall");
        ensure!(dungeon.is_discovered(player), "Invariant failed: player cell undiscovered");
        ensure!(
            dungeon.discovered().count() >= discovered_before,
            "Invariant failed: discovery shrank"
        );
        for door in dungeon.doors() {
            ensure!(
                !door.is_open() || dungeon.tick() - door.opened_on_tick() < timeout,
                "Invariant failed: door at {:?} overstayed its timeout",
                door.pos
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!(
        "Starting Fuzz harness on seeds {}..{} for {} moves each...",
        args.seed,
        args.seed + args.runs,
        args.moves
    );
    for seed in args.seed..args.seed + args.runs {
        run(seed, args.moves)?;
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
