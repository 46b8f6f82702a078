use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hamilton_snake::game::GameConfig;
use hamilton_snake::modes::{HeadlessConfig, HeadlessRun, WatchMode};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hamilton_snake")]
#[command(version, about = "Snake that plays itself along a Hamiltonian cycle")]
struct Cli {
    /// Run mode
    #[arg(long, default_value = "watch")]
    mode: Mode,

    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width (even)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (even)
    #[arg(long)]
    height: Option<usize>,

    /// Shortcut safety factor in [0, 1]
    #[arg(long)]
    accuracy: Option<f64>,

    /// Milliseconds per tick in watch mode
    #[arg(long)]
    step_ms: Option<u64>,

    /// Draw the cycle under the snake
    #[arg(long)]
    draw_path: bool,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Start a new run after a collision (watch mode)
    #[arg(long)]
    auto_restart: bool,

    /// Number of runs (headless mode)
    #[arg(long, default_value = "1")]
    runs: u32,

    /// Tick ceiling per run (headless mode)
    #[arg(long, default_value = "1000000")]
    max_ticks: u64,

    /// Write logs here in watch mode
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Watch the snake in the terminal
    Watch,
    /// Run without a terminal and print a summary
    Headless,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(accuracy) = self.accuracy {
            config.accuracy = accuracy;
        }
        if let Some(step_ms) = self.step_ms {
            config.step_ms = step_ms;
        }
        if self.draw_path {
            config.draw_path = true;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (&cli.mode, &cli.log_file) {
        (Mode::Headless, _) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .init();
        }
        (Mode::Watch, Some(path)) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // The alternate screen owns the terminal
        (Mode::Watch, None) => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.game_config()?;
    tracing::info!(
        width = config.grid_width,
        height = config.grid_height,
        accuracy = config.accuracy,
        seed = ?config.seed,
        "starting"
    );

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Watch => {
            let mut watch_mode =
                WatchMode::new(config, cli.auto_restart).context("Failed to set up game")?;
            watch_mode.run().await?;
        }
        Mode::Headless => {
            let headless_config = HeadlessConfig {
                runs: cli.runs,
                max_ticks: cli.max_ticks,
                ..HeadlessConfig::new(config)
            };
            let mut headless = HeadlessRun::new(headless_config);
            let summaries = headless.run()?;

            println!(
                "{:>4} {:>10} {:>6} {:>7} {:>10} {:>9}",
                "run", "outcome", "score", "length", "ticks", "shortcut"
            );
            for (i, summary) in summaries.iter().enumerate() {
                println!(
                    "{:>4} {:>10} {:>6} {:>7} {:>10} {:>8.1}%",
                    i + 1,
                    format!("{:?}", summary.outcome),
                    summary.score,
                    summary.length,
                    summary.ticks,
                    summary.shortcut_ratio * 100.0
                );
            }
            let metrics = headless.metrics();
            println!(
                "\nHigh score: {}  Collisions: {}/{}",
                metrics.high_score, metrics.collisions, metrics.runs_played
            );
        }
    }

    Ok(())
}
