//! Error types for the SOS dispatcher.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ChannelKind;
use thiserror::Error;

/// Errors a channel adapter can report for a single send.
///
/// These never escape the dispatcher: each one is recorded as the failure
/// reason of its outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// Provider rejected the credentials
    #[error("Authentication rejected by provider (status {status})")]
    Auth { status: u16 },

    /// Network failure or timeout before a response arrived
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider answered with a non-success status
    #[error("Provider error (status {status}): {message}")]
    Provider { status: u16, message: String },

    /// Provider throttled the request
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The adapter cannot serve this contact
    #[error("Unsupported contact: {0}")]
    UnsupportedContact(String),
}

/// Errors that can occur while loading configuration or building the
/// adapter registry. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A credential required by an enabled channel is absent or blank
    #[error("Missing credential {field} for enabled {channel} channel")]
    MissingCredential { channel: ChannelKind, field: String },

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// No delivery channel is enabled
    #[error("No notification channels enabled")]
    NoChannelsEnabled,
}

/// Returned to the caller when a dispatch cycle delivered nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("SOS delivery failed on every channel ({failures} failed attempts)")]
pub struct AggregateFailure {
    pub failures: usize,
}

/// Convenience type alias for Results with AdapterError
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
