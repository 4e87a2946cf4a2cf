use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::Html;
use serde::{Deserialize, Serialize};

use crate::services::SampleCache;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

#[derive(Clone)]
pub struct StatusState {
    pub cache: Arc<SampleCache>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestSampleResponse {
    pub temperature: f64,
    pub pressure: f64,
}

pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Latest sample as JSON, re-reading through the sensor when the cached value
/// is stale. Before the first successful read this mirrors the firmware and
/// reports zeros rather than failing the page.
pub async fn get_latest_sample(State(state): State<StatusState>) -> Json<LatestSampleResponse> {
    let response = match state.cache.refresh_if_stale().await {
        Some(reading) => LatestSampleResponse {
            temperature: (reading.temperature_c * 100.0).round() / 100.0,
            pressure: (reading.pressure_hpa * 100.0).round() / 100.0,
        },
        None => LatestSampleResponse {
            temperature: 0.0,
            pressure: 0.0,
        },
    };

    Json(response)
}
