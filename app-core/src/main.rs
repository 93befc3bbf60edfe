use app_core::app_state::{AppState, InMemoryGoalStore};
use app_core::{AppConfig, MyFinanceApp};
use eframe::egui;
use log::{error, info};
use std::sync::Arc;

fn main() -> Result<(), eframe::Error> {
    // Config first: it carries the default log filter
    let config_result = AppConfig::load();
    let log_filter = config_result
        .as_ref()
        .map(|config| config.log_filter.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter)).init();
    info!("Starting My Finance egui application");

    let config = match config_result {
        Ok(config) => config,
        Err(e) => {
            error!("{}; falling back to default config", e);
            AppConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([640.0, 480.0])
            .with_title(config.window.title.clone())
            .with_resizable(true),
        ..Default::default()
    };

    let store = InMemoryGoalStore::new().with_latency(config.simulated_latency());
    let state = AppState::new(Arc::new(store));
    let app_name = config.window.title.clone();

    info!("Launching egui window");
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |_cc| Ok(Box::new(MyFinanceApp::new(state, config)))),
    )
}
