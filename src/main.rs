mod app;
mod state;
mod ui;

use app::MonthFilterApp;
use eframe::egui;
use month_filter::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Month Filter – Birth / Death / Other",
        options,
        Box::new(|_cc| Ok(Box::new(MonthFilterApp::new(config)))),
    )
}
