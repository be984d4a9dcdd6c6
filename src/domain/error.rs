//! Error types for the portfolio page core.
//!
//! This module defines the centralized error type [`PortfolioError`] and a type alias
//! [`Result`] used throughout the crate. Errors never escape to the page as crashes:
//! the host logs whatever `handle_event` returns and keeps running.

use thiserror::Error;

/// The main error type for portfolio operations.
///
/// Variants cover configuration and preset loading, the contact submission
/// transport, and lookups of per-card state.
///
/// # Examples
///
/// ```
/// use portfolio::PortfolioError;
///
/// let err = PortfolioError::HttpStatus(503);
/// assert_eq!(err.to_string(), "Submission rejected with HTTP status 503");
/// ```
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Animation preset TOML could not be parsed.
    #[error("Preset error: {0}")]
    Preset(String),

    /// Reading a preset file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The contact payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The form relay could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The form relay answered with a non-2xx status.
    #[error("Submission rejected with HTTP status {0}")]
    HttpStatus(u16),

    /// A contact field failed validation.
    #[error("Invalid {field} field: {reason}")]
    InvalidField {
        /// Field name as it appears in the payload.
        field: &'static str,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// An event referenced a project card that does not exist.
    #[error("Unknown project: {0}")]
    UnknownProject(String),
}

/// A specialized `Result` type for portfolio operations.
pub type Result<T> = std::result::Result<T, PortfolioError>;
