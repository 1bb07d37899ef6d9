// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration system.
//!
//! Lookups that miss are reported as [`ConfigError::NotFound`] or
//! [`ConfigError::SectionNotFound`]. Format anomalies found while loading a
//! keyfile (duplicate sections or keys) are logged and never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// # Examples
///
/// ```
/// use mcs::domain::errors::ConfigError;
///
/// fn lookup() -> Result<String, ConfigError> {
///     Err(ConfigError::NotFound {
///         section: "general".to_string(),
///         key: "volume".to_string(),
///     })
/// }
///
/// assert!(lookup().unwrap_err().is_not_found());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested section, or the key within it, does not exist.
    #[error("Configuration value not found: {section}/{key}")]
    NotFound {
        /// The section that was searched
        section: String,
        /// The key that was not found
        key: String,
    },

    /// The requested section does not exist.
    #[error("Configuration section not found: {section}")]
    SectionNotFound {
        /// The section that was not found
        section: String,
    },

    /// Failed to convert a configuration value with a strict parse.
    #[error(
        "Failed to convert configuration value {section}/{key} to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The section holding the value
        section: String,
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Reading or writing a configuration file failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// The file or directory involved
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration domain cannot be mapped onto a directory.
    #[error("Invalid configuration domain '{domain}': {reason}")]
    InvalidDomain {
        /// The rejected domain
        domain: String,
        /// Why it was rejected
        reason: String,
    },

    /// No backend is registered under the requested name.
    #[error("Configuration backend not found: {name}")]
    BackendNotFound {
        /// The backend name that was requested
        name: String,
    },

    /// A backend failed for a reason of its own.
    #[error("Configuration backend '{backend}' error: {message}")]
    BackendError {
        /// The name of the backend that encountered the error
        backend: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error without a known path.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a `NotFound` error for `section`/`key`.
    pub fn not_found(section: &str, key: &str) -> Self {
        ConfigError::NotFound {
            section: section.to_string(),
            key: key.to_string(),
        }
    }

    /// Creates an `Io` error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for the "value absent" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::NotFound { .. } | ConfigError::SectionNotFound { .. }
        )
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
