// src/config/mod.rs
//! Configuration management for the notifier
//!
//! This module handles all configuration-related functionality including:
//! - Loading and parsing configuration files
//! - Generating configuration templates
//! - Persisting the last announced win height
//!
//! The configuration uses a flat TOML file; the win state is a separate
//! text file so it can be rewritten without touching the config.

/// Core configuration implementation
///
/// Contains the [`ConfigProvider`] trait, the TOML-backed [`FileConfig`]
/// and the typed [`Settings`] view used by a run.
pub mod config;

/// Last-win state persistence
pub mod state;

// Re-export key items for easy access
pub use config::{ConfigProvider, Economics, FileConfig, Settings};
pub use state::{FileWinState, WinStateStore};

use crate::utils::error::Result;
use std::path::PathBuf;

/// Loads notifier configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the configuration file (anything convertible to PathBuf)
///
/// # Returns
/// * `Ok(FileConfig)` - Successfully loaded configuration
/// * `Err(NotifierError)` - If the file couldn't be read or parsed
pub fn load(path: impl Into<PathBuf>) -> Result<FileConfig> {
    FileConfig::load(path)
}

/// Generates a commented configuration template
pub fn generate_template() -> String {
    FileConfig::generate_template()
}
