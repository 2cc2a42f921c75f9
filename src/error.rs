use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that reach the host. Non-zero robocopy exit codes are not errors.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write log {}: {source}", path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read settings {}: {source}", path.display())]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot determine home directory")]
    NoHomeDir,
}

pub type Result<T> = std::result::Result<T, SyncError>;
