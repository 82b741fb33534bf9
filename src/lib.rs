//! MIA Block Win Notifier - announces a mining pool's newly won blocks
//!
//! This crate provides a one-shot checker that:
//! - Fetches a wallet's block history from the miamining.com stats API
//! - Classifies blocks as won, lost or pending and detects a new win
//! - Computes cost basis, expected return and bidding statistics
//! - Posts the report to Discord webhooks and records the announced height

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Win detection, metrics and report rendering
pub mod tracker;

/// Network communication with the stats API and webhooks
pub mod network;

/// Single-invocation orchestration
pub mod runner;

/// Utility functions and error handling
pub mod utils;

/// Command-line interface definitions
pub mod cli;

/// Configuration and win-state management
pub mod config;

/// Shared type definitions
pub mod types;

// Core exports
pub use cli::Commands;
pub use config::{ConfigProvider, FileConfig, FileWinState, Settings, WinStateStore};
pub use network::{DiscordWebhook, MiningHistorySource, Notifier, StatsApiClient};
pub use runner::{RunOutcome, TriggerEvent, run};
pub use tracker::{ClassificationResult, Metrics, WinReport};
pub use types::{Block, HistorySnapshot};
pub use utils::{NotifierError, init_logging};
