// src/network/mod.rs
//! Network communication components
//!
//! This module handles all network interactions of a run:
//! - `StatsApiClient`: reads block history and chain height from the stats service
//! - `DiscordWebhook`: posts announcements to Discord

/// Mining statistics API client
///
/// Fetches a wallet's block history and the current chain height, and
/// converts the wire records into core blocks.
pub mod stats_api;

/// Webhook notifier
///
/// Delivers rendered reports to a destination URL.
pub mod webhook;

// Re-export main components for cleaner imports
pub use stats_api::{MiningHistorySource, StatsApiClient};
pub use webhook::{DiscordWebhook, Notifier};
