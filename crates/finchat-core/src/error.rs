//! Error types for finchat-core

use thiserror::Error;

/// Result type alias for finchat-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Agent construction failed (bad wiring, missing sub-agent, ...)
    #[error("Agent construction failed: {0}")]
    ConstructionFailed(String),

    /// Agent processing failed
    #[error("Agent processing failed: {0}")]
    ProcessingFailed(String),

    /// Deployment configuration is invalid; surfaced at startup
    #[error("Configuration error: {0}")]
    Configuration(String),
}
