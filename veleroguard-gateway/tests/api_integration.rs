//! End-to-end tests of the HTTP surface
//!
//! Requests go through the full router (middleware included) without
//! opening a socket.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use veleroguard_core::DetectorConfig;
use veleroguard_gateway::{create_router, AppState};

fn test_router() -> Router {
    create_router(AppState::with_config(DetectorConfig::default()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn ingest(app: &Router, payload: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri("/sensors/ingest")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await
}

fn reading(sensor_id: &str, value: f64) -> Value {
    json!({
        "sensor_id": sensor_id,
        "sensor_type": "vibration",
        "value": value,
        "unit": "m/s2",
        "timestamp": "2025-06-01T12:00:00.000000"
    })
}

#[tokio::test]
async fn root_returns_banner() {
    let app = test_router();
    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "VeleroGuard AI backend is running");
}

#[tokio::test]
async fn health_reports_service() {
    let app = test_router();
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "veleroguard-backend");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn ingest_warm_up_response_shape() {
    let app = test_router();
    let (status, body) = ingest(&app, reading("mast_accelerometer_01", 4.5)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "accepted");
    assert_eq!(body["reading"]["sensor_id"], "mast_accelerometer_01");
    assert_eq!(body["reading"]["unit"], "m/s2");
    assert_eq!(body["anomaly"]["is_anomaly"], false);
    assert!(body["anomaly"]["z_score"].is_null());
    assert!(body["anomaly"]["mean"].is_null());
    assert_eq!(body["anomaly"]["threshold"], 3.0);
}

#[tokio::test]
async fn ingest_flags_spike_after_baseline() {
    let app = test_router();
    for value in [4.4, 4.6, 4.5, 4.4, 4.6] {
        let (status, _) = ingest(&app, reading("mast", value)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = ingest(&app, reading("mast", 60.0)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["anomaly"]["is_anomaly"], true);
    assert!(body["anomaly"]["z_score"].as_f64().unwrap() > 3.0);
    assert!((body["anomaly"]["mean"].as_f64().unwrap() - 4.5).abs() < 1e-9);
}

#[tokio::test]
async fn negative_value_is_rejected_without_touching_windows() {
    let app = test_router();
    ingest(&app, reading("mast", 4.5)).await;

    let (status, body) = ingest(&app, reading("mast", -3.0)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, rejected_only) = ingest(&app, reading("fresh_sensor", -1.0)).await;
    assert_eq!(rejected_only["code"], "VALIDATION_ERROR");

    let (_, windows) = get(&app, "/sensors/windows").await;
    assert_eq!(windows["windows"]["mast"], json!([4.5]));
    assert!(windows["windows"].get("fresh_sensor").is_none());
    assert_eq!(windows["sensor_count"], 1);
}

#[tokio::test]
async fn bad_timestamp_is_rejected() {
    let app = test_router();
    let mut payload = reading("mast", 1.0);
    payload["timestamp"] = json!("last tuesday");

    let (status, body) = ingest(&app, payload).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn missing_value_is_a_client_error() {
    let app = test_router();
    let (status, body) = ingest(&app, json!({ "sensor_id": "mast" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_PAYLOAD");
    assert!(body["error"].as_str().unwrap().contains("value"));
}

#[tokio::test]
async fn mistyped_field_gets_json_error_body() {
    let app = test_router();
    let (status, body) = ingest(&app, json!({ "sensor_id": "mast", "value": "high" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_PAYLOAD");

    let (_, windows) = get(&app, "/sensors/windows").await;
    assert_eq!(windows["sensor_count"], 0);
}

#[tokio::test]
async fn malformed_json_gets_json_error_body() {
    let app = test_router();
    let (status, body) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/sensors/ingest")
            .header("content-type", "application/json")
            .body(Body::from("{\"sensor_id\": "))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PAYLOAD");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn windows_snapshot_lists_every_sensor_in_order() {
    let app = test_router();
    for value in [1.0, 2.0, 3.0] {
        ingest(&app, reading("rudder", value)).await;
    }
    ingest(&app, reading("bilge", 0.25)).await;

    let (status, body) = get(&app, "/sensors/windows").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sensor_count"], 2);
    assert_eq!(body["windows"]["rudder"], json!([1.0, 2.0, 3.0]));
    assert_eq!(body["windows"]["bilge"], json!([0.25]));
}
