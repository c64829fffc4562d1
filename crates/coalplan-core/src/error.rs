//! Unified error types for the coalplan crates
//!
//! Domain-specific error types convert into [`CoalplanError`] for uniform
//! handling at API boundaries.

use crate::config::ConfigError;
use crate::period::PeriodMapError;
use thiserror::Error;

/// Unified error type for all coalplan operations.
#[derive(Error, Debug)]
pub enum CoalplanError {
    /// I/O errors (file access, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Solver/algorithm errors
    #[error("Solver error: {0}")]
    Solver(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using CoalplanError.
pub type CoalplanResult<T> = Result<T, CoalplanError>;

impl From<ConfigError> for CoalplanError {
    fn from(err: ConfigError) -> Self {
        CoalplanError::Config(err.to_string())
    }
}

impl From<PeriodMapError> for CoalplanError {
    fn from(err: PeriodMapError) -> Self {
        CoalplanError::Validation(err.to_string())
    }
}

impl From<anyhow::Error> for CoalplanError {
    fn from(err: anyhow::Error) -> Self {
        CoalplanError::Other(err.to_string())
    }
}

impl From<String> for CoalplanError {
    fn from(s: String) -> Self {
        CoalplanError::Other(s)
    }
}

impl From<&str> for CoalplanError {
    fn from(s: &str) -> Self {
        CoalplanError::Other(s.to_string())
    }
}
