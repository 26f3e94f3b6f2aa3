//! Base error types for prerun
//!
//! This module provides the foundation error types that all crates can use.

use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Working directory lock could not be acquired
    #[error("Lock error: {0}")]
    Lock(String),

    /// Workspace could not be materialized
    #[error("Workspace error: {0}")]
    Workspace(String),

    /// Progress URL could not be generated
    #[error("URL generation error: {0}")]
    UrlGeneration(String),

    /// Commit status update failed
    #[error("Status report error: {0}")]
    StatusReport(String),

    /// Hook execution error
    ///
    /// Carries the executor's runtime description so a "failed" status can
    /// still be reported with it after the execution error is produced.
    #[error("Hook execution error: {message}")]
    HookExecution {
        /// What went wrong
        message: String,
        /// Free-form runtime description (e.g. elapsed time), present even on failure
        runtime_description: String,
    },

    /// Hook configuration error
    #[error("Hook configuration error: {0}")]
    HookConfig(String),

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// The runtime description attached to a hook execution failure, if any
    #[must_use]
    pub fn runtime_description(&self) -> &str {
        match self {
            Error::HookExecution {
                runtime_description,
                ..
            } => runtime_description,
            _ => "",
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
