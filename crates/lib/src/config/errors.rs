//! Error types for configuration files.

use std::path::PathBuf;

use thiserror::Error;

use crate::tree::NodeKind;

/// Structured error types for configuration file operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration has no file path to save to
    #[error("Configuration has no file path")]
    NoPath,

    /// The file parsed, but its root is not an object
    #[error("Configuration file {path:?} must hold an object, found {actual}")]
    NotAnObject { path: PathBuf, actual: NodeKind },

    /// A relative path contains characters that cannot appear in a file name
    #[error("Invalid relative path: {path:?}")]
    InvalidRelativePath { path: String },

    /// Reading or writing the file failed
    #[error("Configuration file I/O failed for {path:?}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid JSON
    #[error("Configuration file {path:?} is not valid JSON")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Check if this error means the file does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::FileIo { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Check if this error is I/O related
    pub fn is_io_error(&self) -> bool {
        matches!(self, ConfigError::FileIo { .. })
    }

    /// Check if this error concerns the file content
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            ConfigError::NotAnObject { .. } | ConfigError::InvalidJson { .. }
        )
    }

    /// Get the file path involved, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ConfigError::NotAnObject { path, .. }
            | ConfigError::FileIo { path, .. }
            | ConfigError::InvalidJson { path, .. } => Some(path),
            _ => None,
        }
    }
}

// Conversion from ConfigError to the main Error type
impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err)
    }
}
