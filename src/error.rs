//! codeharvest error types

use thiserror::Error;

/// codeharvest error type
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem failure while materializing a single artifact
    #[error("IO error on {filename}: {source}")]
    Io {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    /// Artifact filename would escape the project directory
    #[error("Unsafe artifact path: {0}")]
    UnsafePath(String),

    /// User or project name cannot be used as a directory component
    #[error("Invalid project identity: {0}")]
    InvalidProject(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an I/O error with the artifact filename it concerns.
    pub fn io(filename: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            filename: filename.into(),
            source,
        }
    }
}

/// Result type alias for codeharvest operations
pub type Result<T> = std::result::Result<T, Error>;
