//! Executes one backend command and turns its outcome into a UI event.

use client_core::LiveDataApi;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub async fn execute(api: &dyn LiveDataApi, command: BackendCommand) -> UiEvent {
    match command {
        BackendCommand::SendChat { message } => match api.send_chat(&message).await {
            Ok(body) => UiEvent::ChatReplied(body),
            Err(err) => UiEvent::Error(UiError::from_failure(UiErrorContext::Chat, &err)),
        },
        BackendCommand::ListSensors => match api.list_sensors().await {
            Ok(sensors) => UiEvent::SensorsLoaded(sensors),
            Err(err) => UiEvent::Error(UiError::from_failure(UiErrorContext::SensorList, &err)),
        },
        BackendCommand::QuerySensor(query) => match api.query_sensor(&query).await {
            Ok(body) => UiEvent::SensorQueried(body),
            Err(err) => UiEvent::Error(UiError::from_failure(UiErrorContext::SensorQuery, &err)),
        },
    }
}
