//! Command-line driver for the alien invasion simulator.

mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use invasion_core::InvasionConfig;
use invasion_world::{codec, Outcome, Simulator};
use rand::Rng;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "invasion", about = "Simulate an alien invasion across a map of cities")]
struct Cli {
    /// World map to invade
    in_file: PathBuf,

    /// Where to write the surviving world
    out_file: PathBuf,

    /// Number of aliens to deploy
    #[arg(short = 'N', long)]
    aliens: Option<usize>,

    /// Maximum number of rounds
    #[arg(short, long)]
    iterations: Option<u64>,

    /// RNG seed for a reproducible invasion
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON config file; command-line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a JSON report of the run here
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<InvasionConfig> {
        let mut config = match &self.config {
            Some(path) => InvasionConfig::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => InvasionConfig::default(),
        };

        if let Some(aliens) = self.aliens {
            config.aliens = aliens;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init_logging(cli.debug, cli.log_json)?;

    let config = cli.resolve_config()?;
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(
        aliens = config.aliens,
        iterations = config.iterations,
        seed = seed,
        "Starting alien invasion"
    );

    let world = codec::load(&cli.in_file)
        .with_context(|| format!("failed to read world {}", cli.in_file.display()))?;

    let mut sim = Simulator::with_seed(world, seed);
    sim.deploy(config.aliens)?;
    println!("{}", sim.world());

    let report = sim.run(config.iterations)?;
    match report.outcome {
        Outcome::Stalemate => println!("Stalemate after {} rounds. All aliens trapped.", report.rounds),
        Outcome::Completed => println!("Invasion ran for {} rounds.", report.rounds),
    }
    for destruction in &report.destructions {
        println!("{}", destruction);
    }

    codec::save(sim.world(), &cli.out_file)
        .with_context(|| format!("failed to write world {}", cli.out_file.display()))?;

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        info!(path = %path.display(), "Wrote run report");
    }

    println!("Goodbye world!");
    Ok(())
}
