//! Error types for the analysis core.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an analysis run.
///
/// The core never emits partial results on a fatal error; the offending
/// record or option is named in the message.
#[derive(Debug, Error)]
pub enum Error {
    /// The index provider violated its contract: a dangling container, or
    /// a duplicate USR carrying conflicting kinds.
    #[error("index inconsistency: {0}")]
    IndexInconsistency(String),

    /// Invalid configuration, e.g. an entry-point filename that matches no
    /// indexed file.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The index provider failed to produce its records.
    #[error("index provider error: {0}")]
    Provider(String),
}

impl Error {
    /// Create an index inconsistency error.
    pub fn inconsistency(message: impl Into<String>) -> Self {
        Self::IndexInconsistency(message.into())
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }
}
