use std::sync::Arc;

use super::*;
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use shared::domain::SensorId;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    chat_bodies: Arc<Mutex<Vec<ChatRequest>>>,
    sensor_queries: Arc<Mutex<Vec<Option<String>>>>,
}

async fn handle_chat(State(state): State<ServerState>, Json(body): Json<ChatRequest>) -> Response {
    state.chat_bodies.lock().await.push(body.clone());
    match body.message.as_str() {
        "boom" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "[chat error] upstream timed out",
        )
            .into_response(),
        "structured" => Json(json!({"reply": "hi", "tokens": 3})).into_response(),
        "plain" => "plain reply".into_response(),
        _ => Json(json!("hi there")).into_response(),
    }
}

async fn handle_sensors() -> Json<Value> {
    Json(json!([
        {"sensor_id": "s1", "name": "Temp"},
        {"sensor_id": 7, "name": null}
    ]))
}

async fn handle_sensor(
    State(state): State<ServerState>,
    RawQuery(query): RawQuery,
) -> Response {
    let unknown = query
        .as_deref()
        .map(|raw| raw.contains("sensor_id=missing"))
        .unwrap_or(true);
    state.sensor_queries.lock().await.push(query);
    if unknown {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "unknown sensor"})),
        )
            .into_response();
    }
    Json(json!({"v": 1})).into_response()
}

async fn spawn_server(app: Router) -> std::io::Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

async fn spawn_backend() -> (LiveDataClient, ServerState) {
    let state = ServerState::default();
    let app = Router::new()
        .route("/api/chat", post(handle_chat))
        .route("/api/sensors", get(handle_sensors))
        .route("/api/sensor", get(handle_sensor))
        .with_state(state.clone());
    let server_url = spawn_server(app).await.expect("spawn server");
    let client = LiveDataClient::new(&server_url).expect("client");
    (client, state)
}

#[tokio::test]
async fn chat_posts_message_and_unwraps_json_string_reply() {
    let (client, state) = spawn_backend().await;

    let body = client.send_chat("hello").await.expect("chat");

    assert_eq!(body, ApiBody::Json(json!("hi there")));
    assert_eq!(body.into_chat_text(), "hi there");
    assert_eq!(
        state.chat_bodies.lock().await.as_slice(),
        &[ChatRequest {
            message: "hello".to_string()
        }]
    );
}

#[tokio::test]
async fn chat_returns_text_and_structured_bodies() {
    let (client, _state) = spawn_backend().await;

    let plain = client.send_chat("plain").await.expect("plain");
    assert_eq!(plain, ApiBody::Text("plain reply".to_string()));

    let structured = client.send_chat("structured").await.expect("structured");
    assert_eq!(
        structured.into_chat_text(),
        "{\n  \"reply\": \"hi\",\n  \"tokens\": 3\n}"
    );
}

#[tokio::test]
async fn failed_status_reports_code_and_reason() {
    let (client, _state) = spawn_backend().await;

    let err = client.send_chat("boom").await.expect_err("must fail");

    assert_eq!(
        err,
        RequestFailure::Status {
            status: 500,
            reason: "Internal Server Error".to_string()
        }
    );
    assert_eq!(err.to_string(), "500 Internal Server Error");
}

#[tokio::test]
async fn unregistered_status_has_no_trailing_reason() {
    let app = Router::new().route(
        "/api/sensors",
        get(|| async { (StatusCode::from_u16(599).expect("status"), "odd gateway") }),
    );
    let server_url = spawn_server(app).await.expect("spawn server");
    let client = LiveDataClient::new(&server_url).expect("client");

    let err = client.list_sensors().await.expect_err("599 is a failure");

    assert_eq!(
        err,
        RequestFailure::Status {
            status: 599,
            reason: String::new()
        }
    );
    assert_eq!(err.to_string(), "599");
}

#[tokio::test]
async fn list_sensors_decodes_records_in_order() {
    let (client, _state) = spawn_backend().await;

    let sensors = client.list_sensors().await.expect("sensors");

    assert_eq!(sensors.len(), 2);
    assert_eq!(sensors[0], Sensor::new("s1", Some("Temp")));
    assert_eq!(sensors[1].sensor_id, SensorId::from("7"));
    assert_eq!(sensors[1].label(), "7");
}

#[tokio::test]
async fn list_sensors_rejects_non_list_bodies() {
    let app = Router::new().route("/api/sensors", get(|| async { "no sensors today" }));
    let server_url = spawn_server(app).await.expect("spawn server");
    let client = LiveDataClient::new(&server_url).expect("client");

    let err = client.list_sensors().await.expect_err("text is not a list");
    assert!(matches!(err, RequestFailure::Decode(_)), "unexpected: {err:?}");

    let app = Router::new().route(
        "/api/sensors",
        get(|| async { Json(json!({"sensor_id": "s1"})) }),
    );
    let server_url = spawn_server(app).await.expect("spawn server");
    let client = LiveDataClient::new(&server_url).expect("client");

    let err = client.list_sensors().await.expect_err("object is not a list");
    assert!(err.to_string().contains("expected a list of sensors"));
}

#[tokio::test]
async fn query_sensor_sends_id_and_window_as_query_parameters() {
    let (client, state) = spawn_backend().await;

    let body = client
        .query_sensor(&SensorQuery::new(SensorId::from("s1"), "1h"))
        .await
        .expect("query");

    assert_eq!(body.to_pretty_json(), "{\n  \"v\": 1\n}");
    assert_eq!(
        state.sensor_queries.lock().await.as_slice(),
        &[Some("sensor_id=s1&window=1h".to_string())]
    );
}

#[tokio::test]
async fn query_sensor_encodes_reserved_characters_and_optional_range() {
    let (client, state) = spawn_backend().await;

    let query = SensorQuery::new(SensorId::from("bay 3&4"), "")
        .with_range(Some("2024-01-01T00:00:00Z".to_string()), None);
    client.query_sensor(&query).await.expect("query");

    let seen = state.sensor_queries.lock().await;
    assert_eq!(
        seen.as_slice(),
        &[Some(
            "sensor_id=bay+3%264&window=&start=2024-01-01T00%3A00%3A00Z".to_string()
        )]
    );
}

#[tokio::test]
async fn query_sensor_surfaces_not_found() {
    let (client, _state) = spawn_backend().await;

    let err = client
        .query_sensor(&SensorQuery::new(SensorId::from("missing"), "1h"))
        .await
        .expect_err("unknown sensor");

    assert_eq!(err.to_string(), "404 Not Found");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = LiveDataClient::new(&format!("http://{addr}")).expect("client");
    let err = client.list_sensors().await.expect_err("nothing listening");

    assert!(matches!(err, RequestFailure::Transport(_)), "unexpected: {err:?}");
}

#[test]
fn normalizes_server_urls() {
    assert_eq!(
        normalize_server_url("  127.0.0.1:8088/ ").expect("url"),
        "http://127.0.0.1:8088"
    );
    assert_eq!(
        normalize_server_url("https://agent.example.com//").expect("url"),
        "https://agent.example.com"
    );
    assert_eq!(
        normalize_server_url("http://host:9000/prefix").expect("url"),
        "http://host:9000/prefix"
    );
    assert!(matches!(
        normalize_server_url("   "),
        Err(RequestFailure::InvalidUrl(_))
    ));
    assert!(matches!(
        normalize_server_url("http://exa mple.com"),
        Err(RequestFailure::InvalidUrl(_))
    ));
}

#[test]
fn endpoint_keeps_path_prefix() {
    let client = LiveDataClient::new("http://host:9000/agent").expect("client");
    let url = client
        .endpoint("/api/sensor", &[("sensor_id".to_string(), "s1".to_string())])
        .expect("endpoint");
    assert_eq!(url.as_str(), "http://host:9000/agent/api/sensor?sensor_id=s1");
}
