// src/utils/mod.rs
//! Utilities module for common functionality
//!
//! This module contains shared utilities used throughout the notifier,
//! including error handling and logging infrastructure.

/// Error types and handling utilities
///
/// Contains the [`NotifierError`] enum which defines all possible error
/// conditions of a run, along with conversion implementations.
pub mod error;

/// Logging configuration and utilities
///
/// Provides logging initialization and configuration for the application,
/// including formatting and output destinations.
pub mod logging;

// Re-export for easier access
pub use error::{NotifierError, Result};
pub use logging::{init_logging, init_verbose_logging};
