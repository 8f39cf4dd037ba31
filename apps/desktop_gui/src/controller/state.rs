//! Console state owned by the app and handed to actions and the reducer.

use shared::domain::{ChatMessage, Sensor, SensorId, WINDOW_PRESETS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl ActionStatus {
    pub fn is_pending(self) -> bool {
        self == ActionStatus::Pending
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Chat,
    ListSensors,
    QuerySensor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct StatusSlot {
    current: ActionStatus,
    before_pending: ActionStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionStatuses {
    chat: StatusSlot,
    list_sensors: StatusSlot,
    query_sensor: StatusSlot,
}

impl ActionStatuses {
    fn slot(&self, action: Action) -> &StatusSlot {
        match action {
            Action::Chat => &self.chat,
            Action::ListSensors => &self.list_sensors,
            Action::QuerySensor => &self.query_sensor,
        }
    }

    fn slot_mut(&mut self, action: Action) -> &mut StatusSlot {
        match action {
            Action::Chat => &mut self.chat,
            Action::ListSensors => &mut self.list_sensors,
            Action::QuerySensor => &mut self.query_sensor,
        }
    }

    pub fn get(&self, action: Action) -> ActionStatus {
        self.slot(action).current
    }

    pub fn set(&mut self, action: Action, status: ActionStatus) {
        self.slot_mut(action).current = status;
    }

    /// Moves the action to `Pending`, remembering where it was.
    pub fn begin(&mut self, action: Action) {
        let slot = self.slot_mut(action);
        if !slot.current.is_pending() {
            slot.before_pending = slot.current;
        }
        slot.current = ActionStatus::Pending;
    }

    /// Undoes `begin` for a request that never left the console.
    pub fn roll_back(&mut self, action: Action) {
        let slot = self.slot_mut(action);
        if slot.current.is_pending() {
            slot.current = slot.before_pending;
        }
    }

    pub fn is_pending(&self, action: Action) -> bool {
        self.get(action).is_pending()
    }

    /// Marks every in-flight action failed; used when the worker is gone.
    pub fn fail_pending(&mut self) {
        for action in [Action::Chat, Action::ListSensors, Action::QuerySensor] {
            if self.is_pending(action) {
                self.set(action, ActionStatus::Failed);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleState {
    pub chat_log: Vec<ChatMessage>,
    pub prompt: String,
    pub sensors: Vec<Sensor>,
    pub selected_sensor: Option<SensorId>,
    pub windows: Vec<String>,
    pub window: String,
    pub range_start: String,
    pub range_end: String,
    pub sensor_output: String,
    pub status: String,
    pub statuses: ActionStatuses,
}

impl ConsoleState {
    pub fn new(default_window: &str) -> Self {
        let mut windows: Vec<String> = WINDOW_PRESETS.iter().map(|w| w.to_string()).collect();
        if !default_window.is_empty() && !windows.iter().any(|w| w == default_window) {
            windows.push(default_window.to_string());
        }

        Self {
            chat_log: Vec::new(),
            prompt: String::new(),
            sensors: Vec::new(),
            selected_sensor: None,
            windows,
            window: default_window.to_string(),
            range_start: String::new(),
            range_end: String::new(),
            sensor_output: String::new(),
            status: "Backend worker starting...".to_string(),
            statuses: ActionStatuses::default(),
        }
    }

    /// Replaces the option list; keeps the current selection when it survives,
    /// otherwise selects the first sensor.
    pub fn replace_sensors(&mut self, sensors: Vec<Sensor>) {
        let keep = self
            .selected_sensor
            .as_ref()
            .filter(|selected| sensors.iter().any(|s| &s.sensor_id == *selected))
            .cloned();
        self.selected_sensor = keep.or_else(|| sensors.first().map(|s| s.sensor_id.clone()));
        self.sensors = sensors;
    }

    pub fn selected_sensor_label(&self) -> Option<&str> {
        let selected = self.selected_sensor.as_ref()?;
        self.sensors
            .iter()
            .find(|s| &s.sensor_id == selected)
            .map(Sensor::label)
    }
}
