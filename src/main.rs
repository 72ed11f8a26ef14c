use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use toroid_snake::game::{GameConfig, GameEngine, GameRng};
use toroid_snake::logging::{self, LogTarget};
use toroid_snake::modes::{HumanMode, SimulateMode};
use toroid_snake::settings;

#[derive(Parser)]
#[command(name = "toroid_snake")]
#[command(version, about = "Snake on a wrapping grid with accumulating obstacles")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON file with game settings; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings to this JSON file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Grid width (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// Seed for food and obstacle placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks to run in simulate mode
    #[arg(long, default_value = "100000")]
    ticks: u64,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. "info" or "toroid_snake=debug"
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play with keyboard controls
    Human,
    /// Run headless with an autopilot and print statistics
    Simulate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let target = match (&cli.log_file, &cli.mode) {
        (Some(path), _) => LogTarget::File(path),
        (None, Mode::Human) => LogTarget::Discard,
        (None, Mode::Simulate) => LogTarget::Stderr,
    };
    logging::init(target, &cli.log_level)?;

    let mut config = match &cli.config {
        Some(path) => settings::load_config(path)?,
        None => GameConfig::default(),
    };
    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }

    if let Some(path) = &cli.write_config {
        settings::export_config(&config, path)?;
        println!("Settings written to {}", path.display());
        return Ok(());
    }

    let rng = match cli.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    let engine = GameEngine::with_rng(config, rng).context("Invalid game configuration")?;

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(engine);
            human_mode.run().await?;
        }
        Mode::Simulate => {
            let mut simulate_mode = SimulateMode::new(engine, cli.ticks);
            simulate_mode.run();
            simulate_mode.print_summary();
        }
    }

    Ok(())
}
