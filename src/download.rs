use std::io::{self, BufRead, BufReader, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::command::Invocation;
use crate::error::DownloadError;
use crate::models::{LogEvent, RunOutcome};

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Default)]
struct ActiveRun {
    child: Option<Child>,
    stop_requested: bool,
}

/// Runs at most one external process at a time on a background thread,
/// forwarding its output line by line into a channel.
///
/// Every run ends with a `LogEvent::Finished` followed by `LogEvent::Done`.
#[derive(Clone, Default)]
pub struct ProcessRunner {
    active: Arc<Mutex<Option<ActiveRun>>>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.active.lock().is_some()
    }

    pub fn start(&self, invocation: Invocation, tx: Sender<LogEvent>) -> Result<thread::JoinHandle<()>, DownloadError> {
        {
            let mut active = self.active.lock();
            if active.is_some() {
                return Err(DownloadError::AlreadyRunning);
            }
            *active = Some(ActiveRun::default());
        }

        let active = Arc::clone(&self.active);
        Ok(thread::spawn(move || {
            let outcome = run(&invocation, &active, &tx);
            info!("{} finished: {outcome}", invocation.program.display());

            *active.lock() = None;
            let _ = tx.send(LogEvent::Finished(outcome));
            let _ = tx.send(LogEvent::Done);
        }))
    }

    /// Asks the running process to stop. Returns false when nothing is running.
    ///
    /// The worker keeps draining output until the process closes its streams.
    pub fn stop(&self) -> bool {
        let mut active = self.active.lock();
        let Some(run) = active.as_mut() else {
            return false;
        };

        run.stop_requested = true;
        if let Some(child) = run.child.as_mut() {
            info!("stopping process {}", child.id());
            if let Err(e) = terminate(child) {
                warn!("failed to signal process {}: {e}", child.id());
            }
        }
        true
    }
}

fn run(invocation: &Invocation, active: &Mutex<Option<ActiveRun>>, tx: &Sender<LogEvent>) -> RunOutcome {
    debug!("spawning {}", invocation.command_line());

    let mut child = match Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            warn!("failed to launch {}: {e}", invocation.program.display());
            return RunOutcome::SpawnFailed(e.to_string());
        }
    };

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    {
        let mut guard = active.lock();
        let run = guard.get_or_insert_with(ActiveRun::default);
        if run.stop_requested {
            if let Err(e) = terminate(&mut child) {
                warn!("failed to signal process {}: {e}", child.id());
            }
        }
        run.child = Some(child);
    }

    let stderr_reader = stderr.map(|stderr| {
        let tx = tx.clone();
        thread::spawn(move || forward_lines(stderr, &tx))
    });
    if let Some(stdout) = stdout {
        forward_lines(stdout, tx);
    }
    if let Some(handle) = stderr_reader {
        let _ = handle.join();
    }

    // The child stays in the slot until it is reaped, so a stop arriving
    // after the streams closed can still signal it.
    loop {
        {
            let mut guard = active.lock();
            let Some(run) = guard.as_mut() else {
                return RunOutcome::Failed { code: None };
            };
            let Some(child) = run.child.as_mut() else {
                return RunOutcome::Failed { code: None };
            };
            match child.try_wait() {
                Ok(Some(status)) => {
                    run.child = None;
                    return outcome_for(status, run.stop_requested);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("failed to wait for process: {e}");
                    run.child = None;
                    return RunOutcome::Failed { code: None };
                }
            }
        }
        thread::sleep(EXIT_POLL_INTERVAL);
    }
}

/// Sends SIGTERM so the tool can clean up partial files and its own children.
#[cfg(unix)]
fn terminate(child: &mut Child) -> io::Result<()> {
    let pid = libc::pid_t::try_from(child.id()).map_err(|_| io::Error::other("pid out of range"))?;
    // SAFETY: `kill` has no memory effects. The child has not been reaped
    // while it is held here, so the pid still names it.
    if unsafe { libc::kill(pid, libc::SIGTERM) } == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn terminate(child: &mut Child) -> io::Result<()> {
    child.kill()
}

fn outcome_for(status: ExitStatus, stop_requested: bool) -> RunOutcome {
    if status.success() {
        RunOutcome::Completed
    } else if stop_requested {
        RunOutcome::Terminated { code: status.code() }
    } else {
        RunOutcome::Failed { code: status.code() }
    }
}

fn forward_lines(stream: impl Read, tx: &Sender<LogEvent>) {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf).trim_end().to_string();
                if tx.send(LogEvent::Line(line)).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!("output stream closed: {e}");
                break;
            }
        }
    }
}
