use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{config::load_settings, LiveDataApi, LiveDataClient};
use crossbeam_channel::bounded;

use backend_bridge::commands::BackendCommand;
use controller::{events::UiEvent, state::ConsoleState};
use ui::DesktopGuiApp;

const COMMAND_QUEUE_CAPACITY: usize = 256;
const EVENT_QUEUE_CAPACITY: usize = 1024;

#[derive(Parser, Debug)]
#[command(name = "live-data-console", about = "Chat and sensor console for the live data agent")]
struct Args {
    /// Backend base URL, e.g. http://127.0.0.1:8088
    #[arg(long)]
    server_url: Option<String>,
    /// Window selected when the console opens
    #[arg(long)]
    window: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = load_settings()
        .with_overrides(args.server_url, args.window)
        .validated()
        .context("invalid console configuration")?;
    let client: Arc<dyn LiveDataApi> = Arc::new(LiveDataClient::new(&settings.server_url)?);
    tracing::info!(server_url = %settings.server_url, "starting live data console");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(COMMAND_QUEUE_CAPACITY);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(EVENT_QUEUE_CAPACITY);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Live Data Console")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([760.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Live Data Console",
        options,
        Box::new(move |cc| {
            let egui_ctx = cc.egui_ctx.clone();
            backend_bridge::runtime::launch(cmd_rx, ui_tx, client, move || {
                egui_ctx.request_repaint()
            });
            Ok(Box::new(DesktopGuiApp::new(
                cmd_tx,
                ui_rx,
                settings.server_url.clone(),
                ConsoleState::new(&settings.default_window),
            )))
        }),
    )
    .map_err(|err| anyhow!("desktop ui exited with error: {err}"))
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod controller_tests;
