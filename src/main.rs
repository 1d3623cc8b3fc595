//! TigerZone CLI - Command-line interface for simulating TigerZone games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// TigerZone - tile placement rules engine
#[derive(Parser, Debug)]
#[command(name = "tigerzone")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a single self-play game
    Play {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Simulation settings (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Chance of placing a tiger each turn (overrides config)
        #[arg(long)]
        tiger_rate: Option<f64>,

        /// Chance of placing a crocodile each turn (overrides config)
        #[arg(long)]
        crocodile_rate: Option<f64>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save the JSON result to file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Run many games in parallel and aggregate statistics
    Batch {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Simulation settings (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// List the tile catalogue
    Tiles {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match args.command {
        Commands::Play {
            seed,
            config,
            tiger_rate,
            crocodile_rate,
            format,
            save,
        } => cli::play::execute(seed, config, tiger_rate, crocodile_rate, format, save),

        Commands::Batch {
            games,
            seed,
            config,
            threads,
            format,
            progress,
        } => cli::batch::execute(games, seed, config, threads, format, progress),

        Commands::Tiles { format } => cli::tiles::execute(format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
