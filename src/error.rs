//! Error types shared by every command.
//!
//! All variants are fatal to the invoking command. Nothing is retried and
//! nothing is downgraded to a warning.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapError {
    /// Filesystem access failed while walking, hashing, loading or saving.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A persisted snapshot could not be decoded.
    #[error("invalid snapshot {}: {message}", .path.display())]
    Format { path: PathBuf, message: String },

    /// Writing the report to stdout failed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),

    /// The config file exists but does not parse.
    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, SnapError>;

impl SnapError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        SnapError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn format(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        SnapError::Format {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Attach a path to a format error raised while decoding bytes that had
    /// no origin yet.
    pub fn with_path(self, origin: impl AsRef<Path>) -> Self {
        match self {
            SnapError::Format { path, message } if path.as_os_str().is_empty() => {
                SnapError::format(origin, message)
            }
            other => other,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_io(&self) -> bool {
        matches!(self, SnapError::Io { .. })
    }
}
