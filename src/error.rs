//! Error types for Reliefdesk
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Reliefdesk operations
///
/// This enum encompasses the failures that can surface from configuration
/// loading, the REST backend, durable storage, CSV export and the
/// interactive shell. Session-store failures are deliberately absent:
/// the session store degrades to "anonymous" instead of erroring.
#[derive(Error, Debug)]
pub enum ReliefError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Durable storage errors (file, keyring or memory backend)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Backend returned a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Error message extracted from the response body
        message: String,
    },

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credential check failed
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Path does not name a resource view
    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    /// Signed-in user lacks the admin role for a guarded route
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Malformed user input (filters, JSON bodies, shell arguments)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// CSV export failures
    #[error("Export error: {0}")]
    Export(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// Line editor errors from the interactive shell
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for Reliefdesk operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
