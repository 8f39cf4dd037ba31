//! Response decoding: content type selects between JSON and raw text.

use serde_json::Value;

use crate::RequestFailure;

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    Json(Value),
    Text(String),
}

impl ApiBody {
    /// Chat rendering: strings stay plain, anything structured is pretty-printed.
    pub fn into_chat_text(self) -> String {
        match self {
            ApiBody::Text(text) => text,
            ApiBody::Json(Value::String(text)) => text,
            ApiBody::Json(value) => pretty_json(&value),
        }
    }

    /// Full pretty rendering. A text body becomes a quoted JSON string.
    pub fn to_pretty_json(&self) -> String {
        match self {
            ApiBody::Json(value) => pretty_json(value),
            ApiBody::Text(text) => pretty_json(&Value::String(text.clone())),
        }
    }
}

pub fn decode_body(content_type: Option<&str>, bytes: &[u8]) -> Result<ApiBody, RequestFailure> {
    let is_json = content_type
        .map(|value| value.to_ascii_lowercase().contains(JSON_CONTENT_TYPE))
        .unwrap_or(false);

    if is_json {
        serde_json::from_slice(bytes)
            .map(ApiBody::Json)
            .map_err(|err| RequestFailure::Decode(format!("invalid JSON response: {err}")))
    } else {
        Ok(ApiBody::Text(String::from_utf8_lossy(bytes).into_owned()))
    }
}

pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
