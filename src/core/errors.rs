//! Error types for the typesift library.
//!
//! Filter pipelines themselves never fail: discovery swallows per-location and
//! per-entity failures. The errors here surface from the fallible edges around
//! the pipeline (configuration files, manifest parsing, descriptor
//! validation) and are what a [`Location`](crate::discovery::Location) reports
//! before discovery decides to skip it.

use std::io;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SiftError>;

/// Every error typesift can report.
#[derive(Error, Debug)]
pub enum SiftError {
    /// Reading a manifest or config file failed
    #[error("I/O error: {message}")]
    Io {
        /// What was being read or written
        message: String,
        /// The OS-level failure
        #[source]
        source: io::Error,
    },

    /// A configuration value is out of range
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// A location could not be read or is malformed
    #[error("Malformed location '{location}': {message}")]
    Manifest {
        /// Location identifier (usually a path)
        location: String,
        /// Error description
        message: String,
    },

    /// A single entry could not be materialized into an entity
    #[error("Cannot resolve '{entity}': {message}")]
    Resolution {
        /// Qualified name of the entry
        entity: String,
        /// Error description
        message: String,
    },

    /// A descriptor field holds an unusable value
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },

    /// A configuration document could not be read or written as YAML
    #[error("YAML error: {source}")]
    Yaml {
        /// Underlying serde_yaml error
        #[from]
        source: serde_yaml::Error,
    },
}

impl SiftError {
    /// I/O failure, with `message` naming the file involved.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Invalid configuration value in `field`.
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Location `location` is unreadable or malformed.
    pub fn manifest(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Manifest {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Entry `entity` cannot be materialized.
    pub fn resolution(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolution {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Descriptor value in `field` is invalid.
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}
