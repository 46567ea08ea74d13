use eframe::egui;
use rfd::FileDialog;
use std::path::Path;

use crate::command::expand_user;
use crate::localizations::Localizations;
use crate::models::{AppState, AudioFormat};
use crate::theme::*;

pub fn render_url_input(ui: &mut egui::Ui, state: &mut AppState, localizer: &Localizations) -> egui::Response {
    ui.label(localizer.text("url-label"));

    ui.add_enabled(
        !state.is_downloading,
        egui::TextEdit::singleline(&mut state.url)
            .hint_text(localizer.text("url-placeholder"))
            .desired_width(f32::INFINITY)
            .font(egui::FontId::proportional(15.0)),
    )
}

pub fn render_format_selector(ui: &mut egui::Ui, state: &mut AppState, localizer: &Localizations) {
    ui.label(localizer.text("format-label"));

    ui.add_enabled_ui(!state.is_downloading, |ui| {
        for format in AudioFormat::ALL {
            let label = match format {
                AudioFormat::Mp3 => localizer.text("format-mp3_320"),
                AudioFormat::Aac => localizer.text("format-aac"),
                AudioFormat::Opus => localizer.text("format-opus"),
            };
            ui.radio_value(&mut state.format, format, label);
        }
    });
}

/// Returns true when the directory was changed, by typing or through the picker.
pub fn render_output_dir_selector(ui: &mut egui::Ui, state: &mut AppState, localizer: &Localizations) -> bool {
    let mut changed = false;

    ui.label(localizer.text("output-dir-label"));
    ui.add_enabled_ui(!state.is_downloading, |ui| {
        ui.horizontal(|ui| {
            let response = ui.add_sized(
                [ui.available_width() - 110.0, 28.0],
                egui::TextEdit::singleline(&mut state.output_dir),
            );
            changed = response.changed();

            let button = egui::Button::new(localizer.text("browse-button")).min_size(egui::vec2(100.0, 28.0));
            if ui.add(button).clicked() {
                let start = if state.output_dir.trim().is_empty() {
                    dirs::home_dir().unwrap_or_else(|| Path::new(".").to_path_buf())
                } else {
                    expand_user(&state.output_dir)
                };

                if let Some(path) = FileDialog::new().set_directory(&start).pick_folder() {
                    state.output_dir = path.to_string_lossy().to_string();
                    changed = true;
                }
            }
        });
    });

    changed
}

pub fn render_log(ui: &mut egui::Ui, state: &AppState, localizer: &Localizations) {
    ui.label(localizer.text("log-label"));

    egui::Frame::group(ui.style())
        .fill(LOG_BG)
        .rounding(ROUNDING_FRAME)
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &state.log {
                        let color = if line.starts_with("$ ") { LOG_COMMAND_TEXT } else { LOG_TEXT };
                        ui.label(
                            egui::RichText::new(line)
                                .monospace()
                                .size(LOG_FONT_SIZE)
                                .color(color),
                        );
                    }
                });
        });
}
