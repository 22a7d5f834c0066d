//! Error types for setup rules and the tree they run against

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    /// The project root has no manifest; nothing can be configured
    #[error("No package.json found in project root. Likely not a JavaScript workspace")]
    MissingManifest,

    #[error("Invalid package.json: {0}")]
    InvalidManifest(String),

    #[error("Path \"{}\" already exists", .0.display())]
    FileAlreadyExists(PathBuf),

    #[error("Path \"{}\" does not exist", .0.display())]
    FileDoesNotExist(PathBuf),

    #[error("I/O error on {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("Task '{name}' failed: {reason}")]
    TaskFailed { name: String, reason: String },
}

impl SetupError {
    pub(crate) fn io(path: impl Into<PathBuf>, error: anyhow::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: format!("{:#}", error),
        }
    }
}
