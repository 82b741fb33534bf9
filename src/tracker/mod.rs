// src/tracker/mod.rs
//! Win tracking core
//!
//! Pure logic with no I/O:
//! - Classifying a wallet's block history into won, lost and pending
//! - Deriving cost basis, expected return and bidding statistics
//! - Rendering the announcement for a newly won block

/// History classification
pub mod detector;

/// Economic metrics over a classification
pub mod metrics;

/// Announcement rendering and new-win detection
pub mod report;

pub use detector::{ClassificationResult, classify};
pub use metrics::{Metrics, compute};
pub use report::{PoolContext, WinReport, check_wins, format_report};
