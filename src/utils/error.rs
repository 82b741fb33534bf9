// src/utils/error.rs
use std::io;
use thiserror::Error;

/// Main error type for the notifier
///
/// This enum represents every condition that aborts a run, from bad
/// configuration through classification and metrics failures to
/// transport errors while talking to the stats API or a webhook.
#[derive(Error, Debug)]
pub enum NotifierError {
    /// Missing or unparseable configuration values
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// History yielded no won blocks for the tracked wallet
    #[error("No winning blocks found among {examined} blocks returned by history endpoint")]
    NoWinsFound {
        /// Number of blocks left after the exclusion filters
        examined: usize,
    },

    /// A derived metric would divide by zero or overflow
    #[error("Metrics unavailable: {0}")]
    MetricsUnavailable(String),

    /// Webhook refused or failed to accept a message
    #[error("Delivery error: {0}")]
    DeliveryError(String),

    /// Stats API returned a payload we cannot interpret
    #[error("Protocol violation: {0}")]
    ProtocolError(String),

    /// Invocation event could not be decoded
    #[error("Invalid trigger event: {0}")]
    TriggerError(String),

    /// Standard I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// URL parsing errors
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Base64 decoding errors
    #[error("Base64 error: {0}")]
    Base64Error(#[from] base64::DecodeError),
}

/// Shorthand result type used across the crate
pub type Result<T> = std::result::Result<T, NotifierError>;
