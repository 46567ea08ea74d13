use anyhow::anyhow;
use eframe::egui;
use log::info;

mod app;
mod command;
mod config;
mod download;
mod error;
mod localizations;
mod models;
mod theme;
mod ui;

use app::YtdlApp;
use config::Settings;
use localizations::Localizations;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env();
    let localizer = Localizations::new();
    let title = localizer.text("app-title");
    info!(
        "starting {title} ({}), output dir {}",
        localizer.current_language(),
        settings.default_output_dir.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(theme::WINDOW_SIZE)
            .with_min_inner_size(theme::MIN_WINDOW_SIZE)
            .with_title(title),
        ..Default::default()
    };

    let app = YtdlApp::new(settings, localizer);

    eframe::run_native(
        title,
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Box::new(app)
        }),
    )
    .map_err(|e| anyhow!("failed to open the main window: {e}"))
}
