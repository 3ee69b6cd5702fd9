//! Error handling for DeckelPost
//!
//! Provides error types for every layer of the post-processor:
//! - Translation errors (contract violations and internal invariant failures)
//! - Configuration errors (validation and file formats)
//!
//! Unrecognized commands are not errors; the translator reports them as
//! diagnostics and keeps going.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Translation error type
///
/// Raised by the command translator for conditions that must abort the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslateError {
    /// A command carried a negative or non-finite feed rate
    #[error("Invalid feed rate {value}: feed must be finite and not negative")]
    InvalidFeed {
        /// The offending feed value, in the internal velocity unit.
        value: f64,
    },

    /// A command carried a non-finite coordinate
    #[error("Invalid length {value} for {letter}: coordinates must be finite")]
    InvalidLength {
        /// Parameter letter carrying the value.
        letter: char,
        /// The offending length, in millimetres.
        value: f64,
    },

    /// An assembled line carries both a Y and a Z word
    #[error("Interlock violation: Y and Z in one block: {line}")]
    InterlockViolation {
        /// The offending line as it would have been emitted.
        line: String,
    },
}

impl TranslateError {
    /// True for errors caused by upstream input rather than by the translator itself
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            TranslateError::InvalidFeed { .. } | TranslateError::InvalidLength { .. }
        )
    }
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A configuration value is out of its valid range.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting {
        /// The setting name.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Main error type for DeckelPost
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Translation error
    #[error(transparent)]
    Translate(#[from] TranslateError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
