use anyhow::{anyhow, Context, Result};
use eframe::egui;
use ml_playground::app::PlaygroundApp;
use ml_playground::config::DemoConfig;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("Error initializing ML playground: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = DemoConfig::from_env().context("loading configuration")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ML Playground – Interactive Demo",
        options,
        Box::new(move |_cc| Ok(Box::new(PlaygroundApp::new(&config)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
