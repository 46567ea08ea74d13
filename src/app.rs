use eframe::egui::{self, Stroke};
use log::{debug, info, warn};
use rfd::{MessageButtons, MessageDialog, MessageLevel};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::command::{build_command, is_valid_url};
use crate::config::Settings;
use crate::download::ProcessRunner;
use crate::error::DownloadError;
use crate::localizations::Localizations;
use crate::models::{AppState, LogEvent, RunOutcome};
use crate::theme::*;
use crate::ui;

pub struct YtdlApp {
    pub state: AppState,
    settings: Settings,
    localizer: Localizations,
    runner: ProcessRunner,
    log_sender: Sender<LogEvent>,
    log_receiver: Receiver<LogEvent>,
}

impl YtdlApp {
    pub fn new(settings: Settings, localizer: Localizations) -> Self {
        let (tx, rx) = mpsc::channel();

        let state = AppState {
            output_dir: settings.default_output_dir.to_string_lossy().to_string(),
            ..Default::default()
        };

        Self {
            state,
            settings,
            localizer,
            runner: ProcessRunner::new(),
            log_sender: tx,
            log_receiver: rx,
        }
    }

    /// Validates the form, builds the command and hands it to the runner.
    ///
    /// On error nothing has been spawned and the state is unchanged, apart
    /// from directory and interpreter errors which are also logged.
    pub fn start_download(&mut self) -> Result<(), DownloadError> {
        let request = self.state.request();
        if request.url.is_empty() {
            return Err(DownloadError::MissingUrl);
        }
        if !is_valid_url(&request.url) {
            return Err(DownloadError::InvalidUrl(request.url));
        }
        if self.state.is_downloading || self.runner.is_running() {
            return Err(DownloadError::AlreadyRunning);
        }

        let interpreter = self.settings.interpreter.as_deref().ok_or(DownloadError::InterpreterNotFound)?;
        let invocation = build_command(interpreter, &request)?;

        info!("starting {} download of {}", request.format.key(), request.url);
        self.runner.start(invocation.clone(), self.log_sender.clone())?;

        self.state.append_log(format!("$ {}", invocation.command_line()));
        self.state.is_downloading = true;
        self.state.last_outcome = None;
        Ok(())
    }

    pub fn stop_download(&mut self) {
        if !self.runner.is_running() {
            return;
        }
        self.state.append_log(self.localizer.text("stopping"));
        self.runner.stop();
    }

    /// Drains everything currently queued without blocking.
    /// Returns true if anything was consumed.
    pub fn poll_logs(&mut self) -> bool {
        let mut consumed = false;
        loop {
            match self.log_receiver.try_recv() {
                Ok(LogEvent::Line(line)) => self.state.append_log(line),
                Ok(LogEvent::Finished(outcome)) => {
                    let text = self.outcome_text(&outcome);
                    self.state.append_log(text);
                    self.state.last_outcome = Some(outcome);
                }
                Ok(LogEvent::Done) => self.state.is_downloading = false,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
            consumed = true;
        }
        consumed
    }

    pub fn outcome_text(&self, outcome: &RunOutcome) -> String {
        let finished = self.localizer.text("finished");
        match outcome {
            RunOutcome::Completed => format!("{finished}: OK"),
            RunOutcome::Failed { code: Some(code) } => format!("{finished}: ERROR (exit {code})"),
            RunOutcome::Failed { code: None } => format!("{finished}: ERROR"),
            RunOutcome::Terminated { .. } => format!("{finished}: {}", self.localizer.text("finished-stopped")),
            RunOutcome::SpawnFailed(reason) => format!("{}: {reason}", self.localizer.text("spawn-error")),
        }
    }

    fn report(&mut self, error: &DownloadError) {
        warn!("download not started: {error}");

        let (title, message) = match error {
            DownloadError::MissingUrl => ("missing-url-title", self.localizer.text("missing-url").to_string()),
            DownloadError::InvalidUrl(_) => ("invalid-url-title", self.localizer.text("invalid-url").to_string()),
            DownloadError::AlreadyRunning => ("busy-title", self.localizer.text("busy").to_string()),
            DownloadError::CreateDir { path, source } => (
                "dir-error-title",
                format!("{}: {} ({source})", self.localizer.text("dir-error"), path.display()),
            ),
            DownloadError::InterpreterNotFound => ("no-python-title", self.localizer.text("no-python").to_string()),
        };

        if error.is_logged() {
            self.state.append_log(message.clone());
        }

        let level = match error {
            DownloadError::AlreadyRunning => MessageLevel::Info,
            _ => MessageLevel::Error,
        };
        MessageDialog::new()
            .set_level(level)
            .set_title(self.localizer.text(title))
            .set_description(message.as_str())
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn try_start(&mut self) {
        if let Err(e) = self.start_download() {
            self.report(&e);
        }
    }

    pub fn update_ui(&mut self, ctx: &egui::Context) {
        self.poll_logs();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.localizer.text("app-title"));
            ui.add_space(12.0);

            let url_response = ui::render_url_input(ui, &mut self.state, &self.localizer);
            if url_response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.try_start();
            }

            ui.add_space(10.0);
            ui::render_format_selector(ui, &mut self.state, &self.localizer);
            ui.add_space(10.0);

            if ui::render_output_dir_selector(ui, &mut self.state, &self.localizer) {
                debug!("output directory set to {}", self.state.output_dir);
            }
            ui.add_space(12.0);

            self.render_buttons(ui);
            ui.add_space(12.0);

            ui::render_log(ui, &self.state, &self.localizer);
        });

        ctx.request_repaint_after(self.settings.poll_interval);
    }

    fn render_buttons(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let download_button = egui::Button::new(
                egui::RichText::new(self.localizer.text("download-button"))
                    .size(BUTTON_FONT_SIZE)
                    .color(BUTTON_MAIN_TEXT),
            )
            .min_size(MIN_SIZE_BUTTON)
            .fill(PRIMARY_BUTTON_BG)
            .rounding(ROUNDING_BUTTON)
            .stroke(Stroke::new(1.0, BORDER_COLOR));

            if ui.add_enabled(!self.state.is_downloading, download_button).clicked() {
                self.try_start();
            }

            let stop_button = egui::Button::new(
                egui::RichText::new(self.localizer.text("stop-button"))
                    .size(BUTTON_FONT_SIZE)
                    .color(BUTTON_MAIN_TEXT),
            )
            .min_size(MIN_SIZE_BUTTON)
            .fill(STOP_BUTTON_BG)
            .rounding(ROUNDING_BUTTON)
            .stroke(Stroke::new(1.0, BORDER_COLOR));

            if ui.add_enabled(self.state.is_downloading, stop_button).clicked() {
                self.stop_download();
            }

            if self.state.is_downloading {
                ui.spinner();
            } else if let Some(outcome) = &self.state.last_outcome {
                let color = if outcome.is_success() { TEXT_SUCCESS } else { TEXT_ERROR };
                ui.colored_label(color, self.outcome_text(outcome));
            }
        });
    }
}

impl eframe::App for YtdlApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_ui(ctx);
    }
}
