use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    RateLimited,
    Internal,
    Unavailable,
    Unknown,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            400 | 422 => Self::Validation,
            429 => Self::RateLimited,
            502..=504 => Self::Unavailable,
            500..=599 => Self::Internal,
            _ => Self::Unknown,
        }
    }
}

/// Body the backend attaches to failed sensor calls: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

#[derive(Debug, Error)]
#[error("{code:?}: {message}")]
pub struct ApiException {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiException {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Best-effort detail for a failed response; falls back to the raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| envelope.error)
            .unwrap_or_else(|_| body.trim().to_string());
        Self::new(ErrorCode::from_status(status), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_statuses_to_codes() {
        assert_eq!(ErrorCode::from_status(404), ErrorCode::NotFound);
        assert_eq!(ErrorCode::from_status(503), ErrorCode::Unavailable);
        assert_eq!(ErrorCode::from_status(500), ErrorCode::Internal);
        assert_eq!(ErrorCode::from_status(418), ErrorCode::Unknown);
    }

    #[test]
    fn unwraps_backend_error_envelope() {
        let err = ApiException::from_response(500, r#"{"error":"trino down"}"#);
        assert_eq!(err.code, ErrorCode::Internal);
        assert_eq!(err.message, "trino down");

        let err = ApiException::from_response(500, "[chat error] upstream timeout\n");
        assert_eq!(err.message, "[chat error] upstream timeout");
    }
}
