use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Method};
use serde::Serialize;
use serde_json::Value;
use shared::{
    domain::Sensor,
    error::ApiException,
    protocol::{ChatRequest, SensorQuery, CHAT_PATH, SENSORS_PATH, SENSOR_QUERY_PATH},
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

mod body;
pub mod config;
pub mod render;

pub use body::{decode_body, pretty_json, ApiBody};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8088";

/// Every way a backend call can fail. Actions render these after a tag such
/// as `[chat error]`, so `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailure {
    #[error("{0}")]
    Transport(String),
    #[error("{}", status_line(.status, .reason))]
    Status { status: u16, reason: String },
    #[error("{0}")]
    Decode(String),
    #[error("invalid server url: {0}")]
    InvalidUrl(String),
}

fn status_line(status: &u16, reason: &str) -> String {
    if reason.is_empty() {
        status.to_string()
    } else {
        format!("{status} {reason}")
    }
}

/// Trims, defaults the scheme to `http://` and drops trailing slashes.
pub fn normalize_server_url(raw: &str) -> Result<String, RequestFailure> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RequestFailure::InvalidUrl("server url is empty".to_string()));
    }

    let lower = trimmed.to_ascii_lowercase();
    let with_scheme = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    let normalized = with_scheme.trim_end_matches('/').to_string();

    Url::parse(&normalized).map_err(|err| RequestFailure::InvalidUrl(format!("{normalized}: {err}")))?;
    Ok(normalized)
}

#[derive(Debug, Clone)]
pub struct RequestOptions {
    method: Method,
    json: Option<Value>,
    query: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            json: None,
            query: Vec::new(),
        }
    }

    pub fn post_json<T: Serialize>(body: &T) -> Result<Self, RequestFailure> {
        let json = serde_json::to_value(body)
            .map_err(|err| RequestFailure::Decode(format!("failed to encode request body: {err}")))?;
        Ok(Self {
            method: Method::POST,
            json: Some(json),
            query: Vec::new(),
        })
    }

    pub fn with_query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.query.extend(
            pairs
                .into_iter()
                .map(|(key, value)| (key.as_ref().to_string(), value.as_ref().to_string())),
        );
        self
    }
}

#[async_trait]
pub trait LiveDataApi: Send + Sync {
    async fn send_chat(&self, message: &str) -> Result<ApiBody, RequestFailure>;
    async fn list_sensors(&self) -> Result<Vec<Sensor>, RequestFailure>;
    async fn query_sensor(&self, query: &SensorQuery) -> Result<ApiBody, RequestFailure>;
}

#[derive(Debug, Clone)]
pub struct LiveDataClient {
    http: Client,
    server_url: String,
}

impl LiveDataClient {
    pub fn new(server_url: &str) -> Result<Self, RequestFailure> {
        Ok(Self {
            http: Client::new(),
            server_url: normalize_server_url(server_url)?,
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn endpoint(&self, path: &str, query: &[(String, String)]) -> Result<Url, RequestFailure> {
        let raw = format!("{}{path}", self.server_url);
        let mut url =
            Url::parse(&raw).map_err(|err| RequestFailure::InvalidUrl(format!("{raw}: {err}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Issues one request. Non-2xx statuses fail with `"<status> <reason>"`;
    /// successful bodies are decoded by their declared content type.
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiBody, RequestFailure> {
        let url = self.endpoint(path, &options.query)?;
        debug!(method = %options.method, %url, "api request");

        let mut builder = self.http.request(options.method.clone(), url.clone());
        if let Some(json) = &options.json {
            builder = builder.json(json);
        }

        let response = builder.send().await.map_err(|err| {
            warn!(method = %options.method, %url, "api transport failure: {err}");
            RequestFailure::Transport(err.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = ApiException::from_response(status.as_u16(), &body);
            warn!(
                method = %options.method,
                %url,
                status = status.as_u16(),
                code = ?detail.code,
                "api request failed: {}",
                detail.message
            );
            return Err(RequestFailure::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|err| RequestFailure::Transport(err.to_string()))?;

        decode_body(content_type.as_deref(), &bytes)
    }
}

fn sensors_from_body(body: ApiBody) -> Result<Vec<Sensor>, RequestFailure> {
    match body {
        ApiBody::Json(value) => serde_json::from_value(value)
            .map_err(|err| RequestFailure::Decode(format!("expected a list of sensors: {err}"))),
        ApiBody::Text(_) => Err(RequestFailure::Decode(
            "expected a JSON list of sensors, got text".to_string(),
        )),
    }
}

#[async_trait]
impl LiveDataApi for LiveDataClient {
    async fn send_chat(&self, message: &str) -> Result<ApiBody, RequestFailure> {
        let options = RequestOptions::post_json(&ChatRequest {
            message: message.to_string(),
        })?;
        self.request(CHAT_PATH, options).await
    }

    async fn list_sensors(&self) -> Result<Vec<Sensor>, RequestFailure> {
        let body = self.request(SENSORS_PATH, RequestOptions::get()).await?;
        sensors_from_body(body)
    }

    async fn query_sensor(&self, query: &SensorQuery) -> Result<ApiBody, RequestFailure> {
        let options = RequestOptions::get().with_query(query.query_pairs());
        self.request(SENSOR_QUERY_PATH, options).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
