//! Unified error types for the scope-keys workspace.
//!
//! Classification itself never fails; these errors come from the edges:
//! loading configuration, driving the terminal, and registering event
//! channels.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Channel;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum ScopeError {
    /// An I/O operation on a file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// The terminal could not be set up, drawn, or polled.
    #[error("terminal error: {source}")]
    Terminal {
        /// Underlying I/O error from the terminal backend.
        #[from]
        source: std::io::Error,
    },

    /// An event channel could not be subscribed.
    #[error("cannot subscribe to {channel} channel: {message}")]
    Subscription {
        /// Channel whose registration failed.
        channel: Channel,
        /// Description of the failure.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ScopeError>;
