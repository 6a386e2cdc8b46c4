//! # Error Types
//!
//! Errors raised while constructing page behaviors. Event handling itself is
//! infallible: missing elements or attributes degrade to "feature absent".

use thiserror::Error;

/// Errors that can occur while configuring or attaching behaviors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FolioError {
    /// Configuration could not be parsed or failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A selector uses syntax outside the supported subset.
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector {
        /// The offending selector text.
        selector: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A configuration file could not be read.
    #[error("failed to read {path}: {message}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O message.
        message: String,
    },

    /// The host document refused an operation.
    #[error("host rejected operation: {0}")]
    Host(String),
}

/// Result type for FOLIO operations.
pub type FolioResult<T> = Result<T, FolioError>;
