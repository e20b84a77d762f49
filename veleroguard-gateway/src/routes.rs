//! HTTP handlers
//!
//! The gateway owns everything around the detector: payload parsing,
//! validation and response shaping. Validation happens before evaluation,
//! so a rejected reading never reaches a window.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use veleroguard_core::{AnomalyResult, Reading, WindowSnapshot};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Service name reported by the health probe
pub const SERVICE_NAME: &str = "veleroguard-backend";

/// Body of `POST /sensors/ingest`
#[derive(Debug, Clone, Deserialize)]
pub struct IngestRequest {
    pub sensor_id: String,
    #[serde(default)]
    pub sensor_type: Option<String>,
    pub value: f64,
    #[serde(default)]
    pub unit: Option<String>,
    /// ISO-8601, with or without offset (naive values are UTC)
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    pub status: String,
    pub reading: Reading,
    pub anomaly: AnomalyResult,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WindowsResponse {
    pub sensor_count: usize,
    pub windows: WindowSnapshot,
}

/// Banner at `/`
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "VeleroGuard AI backend is running"
    }))
}

/// Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// Validate a reading, evaluate it, report the classification
pub async fn ingest(
    State(state): State<AppState>,
    payload: Result<Json<IngestRequest>, JsonRejection>,
) -> ApiResult<Json<IngestResponse>> {
    let Json(request) = payload?;
    let reading = request.into_reading()?;

    if let Err(e) = reading.validate() {
        tracing::warn!(sensor_id = %reading.sensor_id, value = reading.value, "rejected reading: {}", e);
        return Err(e.into());
    }

    let anomaly = state.detector.evaluate(&reading.sensor_id, reading.value);
    if anomaly.is_anomaly {
        tracing::warn!(
            sensor_id = %reading.sensor_id,
            value = reading.value,
            z_score = anomaly.z_score,
            "anomaly detected"
        );
    }

    Ok(Json(IngestResponse {
        status: "accepted".to_string(),
        reading,
        anomaly,
    }))
}

/// Current window contents for every sensor
pub async fn windows(State(state): State<AppState>) -> Json<WindowsResponse> {
    let windows = state.detector.snapshot_all();
    Json(WindowsResponse {
        sensor_count: windows.len(),
        windows,
    })
}

impl IngestRequest {
    fn into_reading(self) -> ApiResult<Reading> {
        let timestamp = match self.timestamp.as_deref() {
            Some(raw) => parse_timestamp(raw)?,
            None => Utc::now(),
        };

        Ok(Reading {
            sensor_id: self.sensor_id,
            value: self.value,
            timestamp,
            sensor_type: self.sensor_type,
            unit: self.unit,
        })
    }
}

/// Accepts RFC 3339 and offset-less ISO-8601 (taken as UTC)
fn parse_timestamp(raw: &str) -> ApiResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| ApiError::InvalidTimestamp(raw.to_string()))
}
