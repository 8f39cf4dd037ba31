//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};
use shared::domain::ChatMessage;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::state::ConsoleState;

pub const QUEUE_FULL: &str = "UI command queue is full; please retry";
pub const WORKER_GONE: &str =
    "Backend worker disconnected (possible startup/runtime failure); restart the console";

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    state: &mut ConsoleState,
) {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(err) => {
            let reason = match &err {
                TrySendError::Full(_) => QUEUE_FULL,
                TrySendError::Disconnected(_) => WORKER_GONE,
            };
            tracing::warn!(command = cmd_name, "{reason}");
            roll_back(state, err.into_inner(), reason);
        }
    }
}

/// Reverts the optimistic changes an action made before its command was refused.
fn roll_back(state: &mut ConsoleState, cmd: BackendCommand, reason: &str) {
    state.statuses.roll_back(cmd.action());
    match cmd {
        BackendCommand::SendChat { message } => {
            if state.chat_log.last() == Some(&ChatMessage::me(message.clone())) {
                state.chat_log.pop();
            }
            if state.prompt.trim().is_empty() {
                state.prompt = message;
            }
        }
        BackendCommand::ListSensors | BackendCommand::QuerySensor(_) => {
            state.sensor_output = reason.to_string();
        }
    }
    state.status = reason.to_string();
}
