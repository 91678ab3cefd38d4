use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{load_settings, normalize_base_url, FormController};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::DesktopGuiApp;

#[derive(Parser, Debug)]
#[command(name = "esg-desktop", about = "Desktop form for generating ESG disclosures")]
struct Args {
    #[arg(long, help = "Disclosure service base URL")]
    base_url: Option<String>,
    #[arg(long, help = "Client settings file (default: ./esg_client.toml)")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref());
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    let base_url = normalize_base_url(&settings.base_url)?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(base_url.clone(), cmd_rx, ui_tx);

    let controller = FormController::default().with_history_limit(settings.history_limit);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("ESG disclosure generator")
            .with_inner_size([1180.0, 780.0])
            .with_min_inner_size([860.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "ESG disclosure generator",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(DesktopGuiApp::new(
                controller, cmd_tx, ui_rx, base_url,
            )))
        }),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}
