//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{DisclosureApi, HttpDisclosureClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(base_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.send(UiEvent::Info(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        let api = HttpDisclosureClient::new(base_url);
        tracing::info!(base_url = api.base_url(), "backend worker ready");

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let event = handle_command(&api, cmd).await;
                if ui_tx.send(event).is_err() {
                    tracing::debug!("ui event receiver dropped; stopping backend worker");
                    break;
                }
            }
        });
    });
}

/// Commands run one at a time; the reply is always exactly one event.
pub async fn handle_command<A: DisclosureApi + ?Sized>(api: &A, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::Generate { request } => match api.generate_disclosure(&request).await {
            Ok(response) => UiEvent::DisclosureGenerated(response),
            Err(err) => {
                tracing::warn!("disclosure generation failed: {err:#}");
                UiEvent::GenerateFailed(format!("{err:#}"))
            }
        },
        BackendCommand::RefreshHistory { limit } => match api.history(limit).await {
            Ok(items) => UiEvent::HistoryLoaded(items),
            Err(err) => UiEvent::HistoryFailed(format!("{err:#}")),
        },
    }
}
