/*
 * Particle Simulations
 *
 * Small real-time 2D simulations behind one window:
 * 1. Attraction: circles pulling on each other
 * 2. Flocking: boids following separation, alignment and cohesion
 * 3. Falling sand, rain, walkers, Game of Life and a quadtree demo
 *
 * Parameters can be adjusted live from the control panel or preloaded from a
 * YAML file with --config.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use particle_sims::app;
use particle_sims::config::AppConfig;
use particle_sims::logging;
use particle_sims::simulation::SimKind;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file with simulation parameters.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulation to start with; overrides the config file.
    #[arg(short, long, value_enum)]
    sim: Option<SimKind>,

    /// Seed for every random source; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = logging::setup()?;

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(sim) = args.sim {
        config.simulation = sim;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    app::run(config)
}
