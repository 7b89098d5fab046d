//! Error types for setting up directory monitoring.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that prevent a directory monitor from starting.
///
/// Both are fatal to startup; the caller decides whether to abort.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("directory {path} is unavailable: {reason}")]
    DirectoryUnavailable { path: PathBuf, reason: String },

    #[error("cannot watch {path}: {source}")]
    WatchUnavailable {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}
