use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, warn};

pub const PYTHON_ENV: &str = "YTDLP_GUI_PYTHON";
pub const OUTPUT_DIR_ENV: &str = "YTDLP_GUI_OUTPUT_DIR";
pub const POLL_INTERVAL: Duration = Duration::from_millis(120);

#[derive(Debug, Clone)]
pub struct Settings {
    /// Interpreter that runs `-m yt_dlp`. `None` when nothing usable was found.
    pub interpreter: Option<PathBuf>,
    pub default_output_dir: PathBuf,
    pub poll_interval: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        let interpreter = match env::var(PYTHON_ENV) {
            Ok(value) if !value.trim().is_empty() => resolve_interpreter(value.trim()),
            _ => ["python3", "python"].into_iter().find_map(|name| which::which(name).ok()),
        };
        match &interpreter {
            Some(path) => debug!("using interpreter {}", path.display()),
            None => warn!("no Python interpreter found on PATH; set {PYTHON_ENV}"),
        }

        let default_output_dir = env::var_os(OUTPUT_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_download_dir);

        Self {
            interpreter,
            default_output_dir,
            poll_interval: POLL_INTERVAL,
        }
    }
}

fn resolve_interpreter(value: &str) -> Option<PathBuf> {
    let path = Path::new(value);
    if path.components().count() > 1 {
        return Some(path.to_path_buf());
    }
    match which::which(value) {
        Ok(found) => Some(found),
        Err(e) => {
            warn!("{PYTHON_ENV}={value} not found: {e}");
            None
        }
    }
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| env::current_dir().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_interpreter_path_is_kept() {
        assert_eq!(
            resolve_interpreter("/opt/venv/bin/python"),
            Some(PathBuf::from("/opt/venv/bin/python"))
        );
    }

    #[test]
    fn unknown_interpreter_name_resolves_to_none() {
        assert_eq!(resolve_interpreter("definitely-not-a-python-binary"), None);
    }

    #[test]
    fn default_download_dir_is_not_empty() {
        assert!(!default_download_dir().as_os_str().is_empty());
    }
}
