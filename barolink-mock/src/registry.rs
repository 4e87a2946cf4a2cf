use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use barolink_api::{CreateDeviceRequest, CreateMeasureRequest, MetricKind};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;

/// Device row as the registry stores and lists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDevice {
    pub id: i64,
    pub nom: String,
    pub mac_address: String,
    pub location: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMeasure {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: MetricKind,
    pub mesure_value: f64,
    pub device_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

#[derive(Default)]
struct RegistryState {
    devices: Vec<StoredDevice>,
    measures: Vec<StoredMeasure>,
    list_calls: usize,
    create_calls: usize,
    measure_calls: usize,
    fail_listing: bool,
    reject_kinds: HashSet<MetricKind>,
}

/// In-process stand-in for the remote collection API. Keeps call counters and
/// fault-injection switches so tests can assert on what the node actually did
/// on the wire.
#[derive(Clone, Default)]
pub struct MockRegistry {
    state: Arc<Mutex<RegistryState>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/devices/", get(list_devices).post(create_device))
            .route("/devices/:device_id", get(get_device))
            .route("/measures/", get(list_measures).post(create_measure))
            .with_state(self.clone())
    }

    /// Insert a device directly, bypassing the HTTP surface and counters.
    pub fn seed_device(&self, nom: &str, mac_address: &str, location: Option<&str>) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.devices.len() as i64 + 1;

        state.devices.push(StoredDevice {
            id,
            nom: nom.to_string(),
            mac_address: mac_address.to_string(),
            location: location.map(str::to_string),
            created_at: OffsetDateTime::now_utc(),
        });

        id
    }

    /// Make `GET /devices/` answer 500 until switched back.
    pub fn set_fail_listing(&self, fail: bool) {
        self.state.lock().unwrap().fail_listing = fail;
    }

    /// Reject every measure submission of the given kind with a 500.
    pub fn reject_kind(&self, kind: MetricKind) {
        self.state.lock().unwrap().reject_kinds.insert(kind);
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    pub fn measure_calls(&self) -> usize {
        self.state.lock().unwrap().measure_calls
    }

    pub fn devices(&self) -> Vec<StoredDevice> {
        self.state.lock().unwrap().devices.clone()
    }

    pub fn measures(&self) -> Vec<StoredMeasure> {
        self.state.lock().unwrap().measures.clone()
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "Device not found" })),
    )
        .into_response()
}

async fn list_devices(State(registry): State<MockRegistry>) -> Response {
    let mut state = registry.state.lock().unwrap();
    state.list_calls += 1;

    if state.fail_listing {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    Json(state.devices.clone()).into_response()
}

async fn create_device(
    State(registry): State<MockRegistry>,
    Json(payload): Json<CreateDeviceRequest>,
) -> Response {
    let mut state = registry.state.lock().unwrap();
    state.create_calls += 1;

    let id = state.devices.len() as i64 + 1;
    let device = StoredDevice {
        id,
        nom: payload.nom,
        mac_address: payload.mac_address,
        location: payload.location,
        created_at: OffsetDateTime::now_utc(),
    };
    state.devices.push(device.clone());

    Json(device).into_response()
}

async fn get_device(
    State(registry): State<MockRegistry>,
    Path(device_id): Path<i64>,
) -> Response {
    let state = registry.state.lock().unwrap();

    match state.devices.iter().find(|device| device.id == device_id) {
        Some(device) => Json(device.clone()).into_response(),
        None => not_found(),
    }
}

async fn create_measure(
    State(registry): State<MockRegistry>,
    Json(payload): Json<CreateMeasureRequest>,
) -> Response {
    let mut state = registry.state.lock().unwrap();
    state.measure_calls += 1;

    if state.reject_kinds.contains(&payload.kind) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    if !state
        .devices
        .iter()
        .any(|device| device.id == payload.device_id)
    {
        return not_found();
    }

    let measure = StoredMeasure {
        id: state.measures.len() as i64 + 1,
        kind: payload.kind,
        mesure_value: payload.mesure_value,
        device_id: payload.device_id,
        date: OffsetDateTime::now_utc(),
    };
    state.measures.push(measure.clone());

    Json(measure).into_response()
}

async fn list_measures(State(registry): State<MockRegistry>) -> Response {
    let state = registry.state.lock().unwrap();

    Json(state.measures.clone()).into_response()
}
