//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::LiveDataApi;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::{commands::BackendCommand, worker};
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};

/// Spawns the worker thread. Each command runs as its own task, so a slow
/// request never holds up the others and completions arrive in any order.
pub fn launch<F>(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    api: Arc<dyn LiveDataApi>,
    wake_ui: F,
) where
    F: Fn() + Send + Sync + 'static,
{
    let wake_ui = Arc::new(wake_ui);
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let event = UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    UiErrorCategory::Unknown,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                ));
                if ui_tx.send(event).is_err() {
                    tracing::debug!("ui event queue closed; dropping startup failure");
                }
                wake_ui();
                return;
            }
        };

        tracing::info!("backend worker ready");
        notify(&ui_tx, UiEvent::Info("Backend worker ready".to_string()));
        wake_ui();
        while let Ok(cmd) = cmd_rx.recv() {
            tracing::debug!(command = cmd.name(), "backend command received");
            let api = Arc::clone(&api);
            let ui_tx = ui_tx.clone();
            let wake_ui = Arc::clone(&wake_ui);
            runtime.spawn(async move {
                let event = worker::execute(api.as_ref(), cmd).await;
                deliver_completion(ui_tx, event).await;
                wake_ui();
            });
        }
        tracing::info!("ui command queue closed; backend worker stopping");
    });
}

/// Informational events may be dropped when the UI is behind.
fn notify(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => tracing::warn!("ui event queue is full; dropping notice"),
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui event queue closed; dropping notice")
        }
    }
}

/// Completions are what release an action from `Pending`, so they wait for
/// room in the UI queue instead of being dropped.
async fn deliver_completion(ui_tx: Sender<UiEvent>, event: UiEvent) {
    if let Err(TrySendError::Full(event)) = ui_tx.try_send(event) {
        tracing::warn!("ui event queue is full; waiting to deliver completion");
        match tokio::task::spawn_blocking(move || ui_tx.send(event)).await {
            Ok(Ok(())) => {}
            Ok(Err(_)) => tracing::debug!("ui event queue closed; dropping completion"),
            Err(err) => tracing::error!("completion delivery task failed: {err}"),
        }
    }
}
