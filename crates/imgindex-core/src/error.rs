//! Error types for the image indexing pipeline.
//!
//! Errors are split by how far they reach: configuration errors stop a run
//! before scanning, scan errors are confined to a single file, and write
//! errors abort the run after scanning.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for indexer operations.
#[derive(Error, Debug)]
pub enum IndexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The manifest could not be written
    #[error("Failed to write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Records could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// Scan root does not exist or cannot be resolved
    #[error("Scan root not found: {path} ({message})")]
    RootNotFound { path: PathBuf, message: String },

    /// Scan root exists but is not a directory
    #[error("Scan root is not a directory: {0}")]
    RootNotDirectory(PathBuf),
}

/// Errors confined to a single file during a scan.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Filesystem metadata could not be read; the file is left out of the manifest
    #[error("couldn't stat {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image header could not be read; only the optional fields are lost
    #[error("Probe failed for {path}: {message}")]
    Probe { path: PathBuf, message: String },
}

/// Convenience type alias for indexer results.
pub type Result<T> = std::result::Result<T, IndexError>;
