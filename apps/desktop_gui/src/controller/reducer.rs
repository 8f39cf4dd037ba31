//! Applies backend outcomes to console state.

use client_core::render;
use shared::domain::ChatMessage;

use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::state::{Action, ActionStatus, ConsoleState};

pub fn apply(state: &mut ConsoleState, event: UiEvent) {
    match event {
        UiEvent::Info(message) => {
            state.status = message;
        }
        UiEvent::ChatReplied(body) => {
            state.chat_log.push(ChatMessage::bot(body.into_chat_text()));
            state.statuses.set(Action::Chat, ActionStatus::Succeeded);
        }
        UiEvent::SensorsLoaded(sensors) => {
            let count = sensors.len();
            state.replace_sensors(sensors);
            state.sensor_output = render::sensors_loaded(count);
            state
                .statuses
                .set(Action::ListSensors, ActionStatus::Succeeded);
        }
        UiEvent::SensorQueried(body) => {
            state.sensor_output = body.to_pretty_json();
            state
                .statuses
                .set(Action::QuerySensor, ActionStatus::Succeeded);
        }
        UiEvent::Error(err) => apply_error(state, err),
    }
}

fn apply_error(state: &mut ConsoleState, err: UiError) {
    state.status = format!("{} error: {}", err_label(err.category()), err.message());
    match err.context() {
        UiErrorContext::Chat => {
            state
                .chat_log
                .push(ChatMessage::bot(render::chat_failure(err.message())));
            state.statuses.set(Action::Chat, ActionStatus::Failed);
        }
        UiErrorContext::SensorList => {
            state.sensor_output = render::list_failure(err.message());
            state.statuses.set(Action::ListSensors, ActionStatus::Failed);
        }
        UiErrorContext::SensorQuery => {
            state.sensor_output = render::query_failure(err.message());
            state.statuses.set(Action::QuerySensor, ActionStatus::Failed);
        }
        UiErrorContext::BackendStartup => state.statuses.fail_pending(),
    }
}
