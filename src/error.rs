//! LogLore error types

use thiserror::Error;

/// LogLore error type
#[derive(Error, Debug)]
pub enum Error {
    /// Submit requested with blank input; recovered locally
    #[error("Empty input: please enter some log text")]
    EmptyInput,

    /// Analysis call exceeded its deadline
    #[error("Analysis request timed out")]
    Timeout,

    /// Network unreachable / connection refused
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The analysis service returned a non-success status
    #[error("Analysis service rejected the request: {0}")]
    RemoteRejected(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other failure
    #[error("Unexpected failure: {0}")]
    Unknown(String),
}

/// Result type alias for LogLore operations
pub type Result<T> = std::result::Result<T, Error>;
