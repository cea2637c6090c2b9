use anyhow::{Context, Result};
use cinelist::client::MovieClient;
use cinelist::config::ClientConfig;
use cinelist::service::ProcessRunner;
use cinelist::state::UiState;
use cinelist::worker::{self, WorkerCommand, WorkerEvent};
use crossbeam_channel::bounded;
use dotenvy::dotenv;
use eframe::egui;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod gui;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let env_file = dotenv();
    init_tracing();
    match env_file {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}) - relying on environment", e),
    }
    let config = ClientConfig::from_env()?;

    let client = MovieClient::new(
        Arc::new(ProcessRunner::new(config.service.clone())),
        config.placeholder_list.clone(),
    );
    let (cmd_tx, cmd_rx) = bounded::<WorkerCommand>(16);
    let (event_tx, event_rx) = bounded::<WorkerEvent>(64);
    worker::spawn(client, cmd_rx, event_tx).context("Failed to spawn worker thread")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Movie Search")
            .with_inner_size([640.0, 520.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    let state = UiState::new(config.user_id);
    eframe::run_native(
        "Movie Search",
        options,
        Box::new(move |_cc| Ok(Box::new(gui::MovieLookupApp::new(state, cmd_tx, event_rx)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI exited with error: {}", e))
}
