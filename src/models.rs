use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// Extract and transcode to 320 kbps MP3.
    Mp3,
    /// Extract and transcode to AAC at best quality.
    Aac,
    /// Keep the Opus stream as downloaded.
    Opus,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::Mp3
    }
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 3] = [Self::Mp3, Self::Aac, Self::Opus];

    pub fn key(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3_320",
            Self::Aac => "aac",
            Self::Opus => "opus",
        }
    }
}

/// Snapshot of the form fields taken when a download starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub output_dir: String,
    pub format: AudioFormat,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>, output_dir: impl Into<String>, format: AudioFormat) -> Self {
        Self {
            url: url.into().trim().to_string(),
            output_dir: output_dir.into(),
            format,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Failed { code: Option<i32> },
    SpawnFailed(String),
    Terminated { code: Option<i32> },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Failed { code: Some(code) } => write!(f, "failed (exit {code})"),
            Self::Failed { code: None } => write!(f, "failed (no exit code)"),
            Self::SpawnFailed(reason) => write!(f, "spawn failed: {reason}"),
            Self::Terminated { .. } => write!(f, "terminated"),
        }
    }
}

/// Items travelling from the download worker to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// One line of tool output, verbatim.
    Line(String),
    /// Final status of the run.
    Finished(RunOutcome),
    /// End of stream. Never rendered.
    Done,
}

#[derive(Default)]
pub struct AppState {
    pub url: String,
    pub format: AudioFormat,
    pub output_dir: String,
    pub is_downloading: bool,
    pub log: Vec<String>,
    pub last_outcome: Option<RunOutcome>,
}

impl AppState {
    pub fn request(&self) -> DownloadRequest {
        DownloadRequest::new(self.url.as_str(), self.output_dir.as_str(), self.format)
    }

    pub fn append_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }
}
