//! Error types for m2-settings

use std::path::PathBuf;

/// Result type for m2-settings operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading settings documents
///
/// Every variant is fatal for a resolution pass: no partially merged
/// document is ever returned alongside one of these.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The settings file exists but could not be read
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not well-formed XML or does not fit the settings schema
    #[error("Failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },

    /// The settings file parsed but violates a required-field rule
    #[error("Invalid settings at {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the settings file this error originated from
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } | Self::Invalid { path, .. } => path,
        }
    }
}
