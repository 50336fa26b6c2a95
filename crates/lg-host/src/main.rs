//! Lucky Games - headless host for the prize wheel and slot machine
//!
//! Usage:
//!   lucky-games wheel                     - Spin the stock wheel once
//!   lucky-games slot --spins 5 --seed 7   - Five reproducible slot spins
//!   lucky-games --config games.yaml wheel - Spin a configured wheel
//!
//! Set `RUST_LOG=debug` (or `trace` for every frame) to see engine logs.

mod config;
mod session;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use lg_core::ImageCache;

use crate::config::HostConfig;
use crate::session::{Pacing, run_slot, run_wheel};

#[derive(Parser)]
#[command(name = "lucky-games", about = "Prize wheel and slot machine spins")]
struct Cli {
    /// Config file with `wheel` and/or `slot` sections (.json, .yaml, .yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for reproducible outcomes
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Display refresh rate to simulate
    #[arg(long, global = true, default_value_t = 60)]
    fps: u32,

    /// Pace frames by the wall clock instead of simulating them
    #[arg(long, global = true)]
    realtime: bool,

    /// Number of spins
    #[arg(short = 'n', long, global = true, default_value_t = 1)]
    spins: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spin the prize wheel
    Wheel,
    /// Spin the slot machine
    Slot,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = HostConfig::load_or_stock(cli.config.as_deref())?;
    let pacing = Pacing {
        fps: cli.fps,
        realtime: cli.realtime,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("lg-images")
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Wheel => {
            let images = runtime.block_on(ImageCache::preload(&config.wheel.segments));
            log::info!("Wheel ready, {} images resolved", images.len());
            run_wheel(&config.wheel, &images, cli.seed, cli.spins, pacing, &mut out)?;
        }
        Commands::Slot => {
            let symbols = config.slot.reels.concat();
            let images = runtime.block_on(ImageCache::preload(&symbols));
            log::info!("Slot ready, {} images resolved", images.len());
            run_slot(&config.slot, &images, cli.seed, cli.spins, pacing, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
