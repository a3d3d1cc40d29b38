use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use delve_core::{Direction, Dungeon, DungeonConfig, GenerationStats, Pos, generate_dungeon};
use log::info;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the dungeon layout
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// TOML file with generation settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the configured grid width
    #[arg(long)]
    width: Option<usize>,
    /// Override the configured grid height
    #[arg(long)]
    height: Option<usize>,
    /// Random moves to make before printing
    #[arg(short, long, default_value_t = 0)]
    walk: usize,
    /// Blank out cells the player has not seen
    #[arg(long)]
    fog: bool,
    /// Print a JSON report instead of the map
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    width: usize,
    height: usize,
    fingerprint: String,
    spawn: Pos,
    player: Pos,
    tick: u64,
    discovered_cells: usize,
    stats: &'a GenerationStats,
}

fn load_config(args: &Args) -> Result<DungeonConfig> {
    let mut config = match &args.config {
        Some(path) => DungeonConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => DungeonConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    config.validate().context("Invalid command line overrides")?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;

    let generated = generate_dungeon(&config, args.seed);
    let fingerprint = format!("{:016x}", generated.fingerprint());
    let mut dungeon = Dungeon::from_generated(config, args.seed, generated);

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut moved = 0;
    for _ in 0..args.walk {
        let direction = Direction::ALL[rng.next_u64() as usize % Direction::ALL.len()];
        if dungeon.move_player(direction) {
            moved += 1;
        }
    }
    if args.walk > 0 {
        info!("walked {moved} of {} attempted moves", args.walk);
    }

    if args.json {
        let report = Report {
            seed: args.seed,
            width: dungeon.width(),
            height: dungeon.height(),
            fingerprint,
            spawn: dungeon.spawn(),
            player: dungeon.player().pos,
            tick: dungeon.tick(),
            discovered_cells: dungeon.discovered().count(),
            stats: dungeon.stats(),
        };
        let text =
            serde_json::to_string_pretty(&report).context("Failed to serialize the report")?;
        println!("{text}");
    } else {
        print!("{}", dungeon.render_ascii(args.fog));
        println!("Seed: {}  Fingerprint: {fingerprint}  Tick: {}", args.seed, dungeon.tick());
    }

    Ok(())
}
