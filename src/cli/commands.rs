// src/cli/commands.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// MIA Block Win Notifier - announces newly won MIA blocks on Discord
#[derive(Parser, Debug)]
#[command(name = "mia-win-notifier")]
#[command(version, about, long_about = None)]
pub struct Commands {
    /// The action to perform (run a check or generate config)
    #[command(subcommand)]
    pub action: Action,
}

/// Top-level commands for the notifier
#[derive(Subcommand, Debug)]
pub enum Action {
    /// Check for a new win and announce it
    Check(CheckOptions),

    /// Generate configuration file template
    Config(ConfigOptions),
}

/// Options for a single win check
#[derive(Parser, Debug)]
pub struct CheckOptions {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// File holding the last announced block height
    #[arg(short, long, default_value = "last_won_block")]
    pub state: PathBuf,

    /// Production run: also post to the production webhook and record the win
    #[arg(short, long, conflicts_with = "event")]
    pub prod: bool,

    /// Trigger payload `{"prod": bool}`, raw JSON or base64
    #[arg(short, long)]
    pub event: Option<String>,

    /// Default to debug logging when RUST_LOG is unset
    #[arg(short, long)]
    pub verbose: bool,
}

/// Options for generating configuration files
#[derive(Parser, Debug)]
pub struct ConfigOptions {
    /// Output file path
    #[arg(short, long, default_value = "config.toml")]
    pub output: PathBuf,
}
