//! User actions. Each one validates, updates state, and returns the command
//! to queue, or `None` when nothing should reach the network.

use client_core::render;
use shared::{domain::ChatMessage, protocol::SensorQuery};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::state::{Action, ConsoleState};

pub fn submit_chat(state: &mut ConsoleState) -> Option<BackendCommand> {
    if state.statuses.is_pending(Action::Chat) {
        return None;
    }
    let message = state.prompt.trim().to_string();
    if message.is_empty() {
        return None;
    }

    state.chat_log.push(ChatMessage::me(message.clone()));
    state.prompt.clear();
    state.statuses.begin(Action::Chat);
    Some(BackendCommand::SendChat { message })
}

pub fn request_sensor_list(state: &mut ConsoleState) -> Option<BackendCommand> {
    if state.statuses.is_pending(Action::ListSensors) {
        return None;
    }

    state.statuses.begin(Action::ListSensors);
    state.sensor_output = render::LOADING_SENSORS.to_string();
    Some(BackendCommand::ListSensors)
}

pub fn request_sensor_query(state: &mut ConsoleState) -> Option<BackendCommand> {
    if state.statuses.is_pending(Action::QuerySensor) {
        return None;
    }
    let Some(sensor_id) = state.selected_sensor.clone() else {
        state.sensor_output = render::PICK_SENSOR_FIRST.to_string();
        return None;
    };

    state.statuses.begin(Action::QuerySensor);
    state.sensor_output = render::querying(sensor_id.as_str(), &state.window);
    let query = SensorQuery::new(sensor_id, state.window.clone()).with_range(
        Some(state.range_start.clone()),
        Some(state.range_end.clone()),
    );
    Some(BackendCommand::QuerySensor(query))
}
