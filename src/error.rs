//! Error types shared by the pile modules.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PileError {
    #[error("No pile configuration found at {path:?}. Run 'pile init' to create one.")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse pile configuration {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize pile configuration for {path:?}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to get home directory")]
    HomeDirUnavailable,

    #[error("Failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    #[error("Pile {name} not found in pile-library")]
    BundleNotFound { name: String },

    #[error("Failed to copy files into {dest:?}: {source}")]
    CopyFailed {
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to run {command}: {source}")]
    ChildProcessFailed {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid pile name {0:?}: only letters, digits, '-' and '_' are allowed")]
    InvalidName(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl PileError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
