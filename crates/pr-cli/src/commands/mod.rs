//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod review;
pub mod status;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pr_core::config::Config;
use std::path::{Path, PathBuf};

/// prompt-reviewer - sort prompt records into kept, discarded and skipped
#[derive(Debug, Parser)]
#[command(name = "prompt-reviewer")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PROMPT_REVIEWER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Review the records of an input file
    Review(review::ReviewArgs),

    /// Show the saved buckets of an output directory
    Status(status::StatusArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The full-screen UI owns the terminal; keep routine warnings off it
    let fullscreen = matches!(&cli.command, Commands::Review(args) if !args.no_tui);
    setup_logging(cli.verbose, fullscreen);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(pr_storage::default_config_path);

    // Dispatch to command handler
    match cli.command {
        Commands::Review(args) => review::execute(args, &load_config(&config_path)?),
        Commands::Status(args) => status::execute(args, &load_config(&config_path)?),
        Commands::Config(cmd) => config::execute(cmd, &config_path),
    }
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = Config::load_or_default(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::debug!("Configuration: {:?}", config);
    Ok(config)
}

fn setup_logging(verbosity: u8, fullscreen: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 if fullscreen => EnvFilter::new("error"),
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
