use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DownloadError;
use crate::models::{AudioFormat, DownloadRequest};

pub const OUTPUT_TEMPLATE: &str = "%(title)s [%(id)s].%(ext)s";
const AUDIO_SOURCE: &str = "ba[acodec*=opus]/ba";

/// A program plus its ordered arguments, ready to hand to `std::process::Command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Shell-like rendering for the log panel. Not meant to be re-parsed.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Accepts only strings shaped like an http(s) URL.
///
/// Anything starting with `-` is rejected so a value typed into the URL
/// field can never be taken by yt-dlp as an option.
pub fn is_valid_url(candidate: &str) -> bool {
    let candidate = candidate.trim();
    if candidate.starts_with('-') {
        return false;
    }

    let rest = strip_prefix_ignore_case(candidate, "https://")
        .or_else(|| strip_prefix_ignore_case(candidate, "http://"));

    matches!(rest.and_then(|r| r.chars().next()), Some(c) if !c.is_whitespace())
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

/// Expands a leading `~` to the home directory. A blank path means `.`.
pub fn expand_user(path: &str) -> PathBuf {
    let path = path.trim();
    if path.is_empty() {
        return PathBuf::from(".");
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Builds the `python -m yt_dlp ...` invocation for a request and makes sure
/// the output directory exists.
///
/// The URL is not validated here. The `--no-exec` flag and the `--` marker
/// right before the URL hold regardless.
pub fn build_command(interpreter: &Path, request: &DownloadRequest) -> Result<Invocation, DownloadError> {
    let target_dir = expand_user(&request.output_dir);
    fs::create_dir_all(&target_dir).map_err(|source| DownloadError::CreateDir {
        path: target_dir.clone(),
        source,
    })?;

    let mut args: Vec<String> = vec![
        "-m".into(),
        "yt_dlp".into(),
        "--newline".into(),
        "--no-exec".into(),
        "-P".into(),
        target_dir.to_string_lossy().into_owned(),
        "-o".into(),
        OUTPUT_TEMPLATE.into(),
        "-f".into(),
        AUDIO_SOURCE.into(),
    ];

    match request.format {
        AudioFormat::Mp3 => args.extend(
            ["-x", "--audio-format", "mp3", "--audio-quality", "320K"].map(String::from),
        ),
        AudioFormat::Aac => args.extend(
            ["-x", "--audio-format", "aac", "--audio-quality", "0"].map(String::from),
        ),
        AudioFormat::Opus => {}
    }

    args.push("--".into());
    args.push(request.url.clone());

    Ok(Invocation::new(interpreter, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIDEO: &str = "https://www.youtube.com/watch?v=test123";

    fn build(format: AudioFormat) -> (tempfile::TempDir, Invocation) {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("music");
        let request = DownloadRequest::new(VIDEO, out.to_string_lossy(), format);
        let invocation = build_command(Path::new("/usr/bin/python3"), &request).unwrap();
        (dir, invocation)
    }

    #[test]
    fn accepts_http_and_https() {
        assert!(is_valid_url("https://www.youtube.com/watch?v=abc"));
        assert!(is_valid_url("http://youtube.com/watch?v=abc"));
        assert!(is_valid_url("HTTPS://YOUTUBE.COM"));
        assert!(is_valid_url("  https://music.youtube.com/watch?v=x  "));
    }

    #[test]
    fn rejects_non_urls() {
        for candidate in [
            "",
            "   ",
            "--exec=rm -rf /",
            "--batch-file=/etc/passwd",
            "--cookies-from-browser=chrome",
            "-v",
            "/etc/passwd",
            "ftp://example.com/file",
            "javascript:alert(1)",
            "https://",
            "https:// example.com",
            "-https://example.com",
            "youtube.com/watch?v=abc",
            "httpsé://x",
        ] {
            assert!(!is_valid_url(candidate), "accepted {candidate:?}");
        }
    }

    #[test]
    fn url_is_last_and_preceded_by_marker() {
        for format in AudioFormat::ALL {
            let (_dir, invocation) = build(format);
            let n = invocation.args.len();
            assert_eq!(invocation.args[n - 1], VIDEO);
            assert_eq!(invocation.args[n - 2], "--");
        }
    }

    #[test]
    fn always_disables_exec() {
        for format in AudioFormat::ALL {
            let (_dir, invocation) = build(format);
            assert!(invocation.args.iter().any(|a| a == "--no-exec"));
        }
    }

    #[test]
    fn runs_as_python_module() {
        let (_dir, invocation) = build(AudioFormat::Opus);
        assert_eq!(invocation.program, Path::new("/usr/bin/python3"));
        assert_eq!(&invocation.args[..3], ["-m", "yt_dlp", "--newline"]);
        assert!(invocation.args.iter().any(|a| a == OUTPUT_TEMPLATE));
    }

    #[test]
    fn opus_has_no_transcoding() {
        let (_dir, invocation) = build(AudioFormat::Opus);
        for flag in ["-x", "--audio-format", "--audio-quality"] {
            assert!(!invocation.args.iter().any(|a| a == flag), "found {flag}");
        }
        assert!(invocation.args.iter().any(|a| a == AUDIO_SOURCE));
    }

    #[test]
    fn mp3_transcodes_at_320k() {
        let (_dir, invocation) = build(AudioFormat::Mp3);
        let args = invocation.args.join(" ");
        assert!(args.contains("-x --audio-format mp3 --audio-quality 320K"));
    }

    #[test]
    fn aac_uses_best_quality() {
        let (_dir, invocation) = build(AudioFormat::Aac);
        let args = invocation.args.join(" ");
        assert!(args.contains("-x --audio-format aac --audio-quality 0"));
    }

    #[test]
    fn option_like_url_still_sits_behind_marker() {
        let dir = tempfile::tempdir().unwrap();
        let request = DownloadRequest::new("--exec=touch /tmp/x", dir.path().to_string_lossy(), AudioFormat::Opus);
        let invocation = build_command(Path::new("python3"), &request).unwrap();
        let n = invocation.args.len();
        assert_eq!(invocation.args[n - 2], "--");
        assert_eq!(invocation.args[n - 1], "--exec=touch /tmp/x");
    }

    #[test]
    fn creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("a").join("b");
        let request = DownloadRequest::new(VIDEO, out.to_string_lossy(), AudioFormat::Mp3);
        let invocation = build_command(Path::new("python3"), &request).unwrap();
        assert!(out.is_dir());
        let pos = invocation.args.iter().position(|a| a == "-P").unwrap();
        assert_eq!(invocation.args[pos + 1], out.to_string_lossy());
    }

    #[test]
    fn reports_dir_creation_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("occupied");
        fs::write(&file, b"x").unwrap();
        let request = DownloadRequest::new(VIDEO, file.join("sub").to_string_lossy(), AudioFormat::Mp3);
        let err = build_command(Path::new("python3"), &request).unwrap_err();
        assert!(matches!(err, DownloadError::CreateDir { .. }));
    }

    #[test]
    fn expands_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_user("~"), home);
            assert_eq!(expand_user("~/Music"), home.join("Music"));
        }
        assert_eq!(expand_user("/srv/music"), PathBuf::from("/srv/music"));
        assert_eq!(expand_user("~other/x"), PathBuf::from("~other/x"));
    }

    #[test]
    fn blank_output_dir_means_current_dir() {
        assert_eq!(expand_user(""), PathBuf::from("."));
        assert_eq!(expand_user("   "), PathBuf::from("."));

        let request = DownloadRequest::new(VIDEO, "", AudioFormat::Opus);
        let invocation = build_command(Path::new("python3"), &request).unwrap();
        let pos = invocation.args.iter().position(|a| a == "-P").unwrap();
        assert_eq!(invocation.args[pos + 1], ".");
    }

    #[test]
    fn command_line_joins_program_and_args() {
        let invocation = Invocation::new("python3", vec!["-m".into(), "yt_dlp".into()]);
        assert_eq!(invocation.command_line(), "python3 -m yt_dlp");
    }
}
