//! Typed error handling for actiongen.
//!
//! Only a missing root enum is fatal to a resolution pass. Dependency
//! candidates that are not enums are never errors; they are dropped by the
//! resolver.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for actiongen operations.
#[derive(Error, Debug)]
pub enum ActiongenError {
    /// The root enum has no locatable definition in the source text.
    #[error("Root enum `{root}` not found in source")]
    RootNotFound { root: String },

    /// I/O error when reading the source or writing output
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Output document could not be serialized
    #[error("Serialization error: {message}")]
    Serialize { message: String },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl ActiongenError {
    /// Create a root-not-found error.
    pub fn root_not_found(root: impl Into<String>) -> Self {
        Self::RootNotFound { root: root.into() }
    }

    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialize(message: impl Into<String>) -> Self {
        Self::Serialize {
            message: message.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ActiongenError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialize(err.to_string())
    }
}

/// Convenience type alias for actiongen results.
pub type ActiongenResult<T> = Result<T, ActiongenError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> ActiongenResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> ActiongenResult<T> {
        self.map_err(|e| ActiongenError::io(path, e))
    }
}
