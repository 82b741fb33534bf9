// src/cli/mod.rs
//! Command-line interface definitions

/// Clap command and option structures
pub mod commands;

pub use commands::{Action, CheckOptions, Commands, ConfigOptions};
