#![allow(dead_code)]

mod app;
mod config;
mod data;
mod error;
mod gui;
mod log;
mod pipeline;

use app::AnnotatorApp;
use config::AppConfig;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    ::log::info!(
        "Starting Ilastik-inspired Prototype v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = AppConfig::from_env();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([640.0, 480.0])
            .with_title("Ilastik-inspired Prototype")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Ilastik-inspired Prototype",
        options,
        Box::new(|cc| Ok(Box::new(AnnotatorApp::new(cc, config)))),
    )
}
