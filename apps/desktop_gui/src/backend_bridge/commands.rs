//! Backend commands queued from UI to backend worker.

use shared::protocol::SensorQuery;

use crate::controller::state::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    SendChat { message: String },
    ListSensors,
    QuerySensor(SensorQuery),
}

impl BackendCommand {
    pub fn action(&self) -> Action {
        match self {
            BackendCommand::SendChat { .. } => Action::Chat,
            BackendCommand::ListSensors => Action::ListSensors,
            BackendCommand::QuerySensor(_) => Action::QuerySensor,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SendChat { .. } => "send_chat",
            BackendCommand::ListSensors => "list_sensors",
            BackendCommand::QuerySensor(_) => "query_sensor",
        }
    }
}
