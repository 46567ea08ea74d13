use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a download request is refused before any process is spawned.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("no URL provided")]
    MissingUrl,
    #[error("not an http(s) URL: {0}")]
    InvalidUrl(String),
    #[error("a download is already in progress")]
    AlreadyRunning,
    #[error("could not create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no Python interpreter found to run yt_dlp")]
    InterpreterNotFound,
}

impl DownloadError {
    /// Whether the error should also be appended to the log panel.
    pub fn is_logged(&self) -> bool {
        matches!(self, Self::CreateDir { .. } | Self::InterpreterNotFound)
    }
}
