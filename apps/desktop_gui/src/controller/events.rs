//! UI/backend events and error modeling for the console controller.

use client_core::{ApiBody, RequestFailure};
use shared::domain::Sensor;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    ChatReplied(ApiBody),
    SensorsLoaded(Vec<Sensor>),
    SensorQueried(ApiBody),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Decode,
    Config,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Chat,
    SensorList,
    SensorQuery,
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Server => "Server",
        UiErrorCategory::Decode => "Response",
        UiErrorCategory::Config => "Configuration",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_failure(context: UiErrorContext, failure: &RequestFailure) -> Self {
        let category = match failure {
            RequestFailure::Transport(_) => UiErrorCategory::Transport,
            RequestFailure::Status { .. } => UiErrorCategory::Server,
            RequestFailure::Decode(_) => UiErrorCategory::Decode,
            RequestFailure::InvalidUrl(_) => UiErrorCategory::Config,
        };
        Self {
            category,
            context,
            message: failure.to_string(),
        }
    }

    pub fn from_message(
        context: UiErrorContext,
        category: UiErrorCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
