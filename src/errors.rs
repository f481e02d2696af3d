//! Error types for the fallible edges of the engine.
//!
//! Scoring itself never fails. These errors only come from loading
//! configuration and from parsing the language model's reply when the
//! caller asks for a strict parse.

use thiserror::Error;

/// Errors surfaced by configuration loading and analysis ingestion.
#[derive(Debug, Error)]
pub enum RiskError {
    /// The configuration file could not be read or parsed.
    #[error("failed to load config: {path}: {message}")]
    Config { path: String, message: String },

    /// The configuration parsed but holds values the engine cannot use.
    #[error("invalid config: {message}")]
    ConfigInvalid { message: String },

    /// The model reply did not contain a usable JSON object.
    #[error("analysis parse error: {message}")]
    Parse { message: String },

    /// The upstream collaborator reported its own failure.
    #[error("upstream analysis failed: {message}")]
    Upstream { message: String },
}

/// Result type for engine operations that can fail.
pub type RiskResult<T> = Result<T, RiskError>;
