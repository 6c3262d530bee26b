//! Hungry Sharks entry point
//!
//! Runs a headless session driven by the autopilot. Snapshots go to stdout as
//! JSON lines so any external renderer can replay the session.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use hungry_sharks::sim::FieldSnapshot;
use hungry_sharks::{Autopilot, Game, GameConfig, Renderer};

#[derive(Debug, Parser)]
#[command(name = "hungry-sharks", about = "Headless Hungry Sharks session")]
struct Args {
    /// JSON config file (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Override the tick cap
    #[arg(long)]
    ticks: Option<u64>,
    /// Print a snapshot every N ticks (0 = never)
    #[arg(long)]
    snapshot_every: Option<u64>,
}

/// Writes every Nth snapshot as one JSON line
struct JsonLinesRenderer<W: Write> {
    out: W,
    every: u64,
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn render(&mut self, snapshot: &FieldSnapshot) {
        if self.every == 0 || snapshot.tick % self.every != 0 {
            return;
        }
        match serde_json::to_string(snapshot) {
            Ok(line) => {
                if let Err(e) = writeln!(self.out, "{line}") {
                    log::warn!("Failed to write snapshot: {e}");
                }
            }
            Err(e) => log::warn!("Failed to encode snapshot: {e}"),
        }
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    outcome: &'static str,
    player_size: u32,
    growth_progress: f32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path),
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        config.max_ticks = ticks;
    }
    if let Some(every) = args.snapshot_every {
        config.snapshot_every = every;
    }
    log::info!("Hungry Sharks (headless) starting, seed {}", config.seed);

    let field = config.build_field().context("building field")?;
    let pilot = Autopilot::new(field.bounds());
    let view = JsonLinesRenderer {
        out: std::io::stdout().lock(),
        every: config.snapshot_every,
    };
    let mut game = Game::new(field, pilot, view, config.sim_dt()).context("starting session")?;

    let end = game.run_headless(config.max_ticks);

    let player = game.field().player();
    let summary = Summary {
        seed: config.seed,
        ticks: game.field().tick_count(),
        outcome: if end.is_over() { end.as_str() } else { "timeout" },
        player_size: player.size(),
        growth_progress: player.growth_progress(),
    };
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
