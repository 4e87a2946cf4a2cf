use barolink_api::{CreateMeasureRequest, MetricKind, SensorReading, STANDARD_SEA_LEVEL_HPA};
use reqwest::Client;

/// Per-metric outcome of one sampling tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub temperature: bool,
    pub pressure: bool,
    pub altitude: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// All three metrics accepted
    Delivered,
    /// Some metrics accepted, some not
    Partial,
    /// Nothing accepted
    Failed,
}

impl TickReport {
    pub fn outcome(&self) -> TickOutcome {
        match (self.temperature, self.pressure, self.altitude) {
            (true, true, true) => TickOutcome::Delivered,
            (false, false, false) => TickOutcome::Failed,
            _ => TickOutcome::Partial,
        }
    }
}

/// Delivers one measurement at a time to the collection endpoint. Calls are
/// independent: no batching, no retry within a tick, no rollback of the
/// metrics that already went through.
pub struct TelemetryService {
    client: Client,
    base_url: String,
}

impl TelemetryService {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self { client, base_url }
    }

    /// Submit a single metric. Returns true iff the registry accepted it.
    /// With no resolved identity (`device_id < 1`) the call short-circuits
    /// before any network I/O so no orphaned measurement can be created.
    pub async fn report(&self, kind: MetricKind, value: f64, device_id: i64) -> bool {
        if device_id < 1 {
            tracing::warn!("dropping {} measurement: no registered device id", kind);
            return false;
        }

        let payload = CreateMeasureRequest::new(kind, value, device_id);

        let result = self
            .client
            .post(format!("{}/measures/", self.base_url))
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(response) if matches!(response.status().as_u16(), 200 | 201) => {
                tracing::debug!(device_id, "{} = {} accepted", kind, payload.mesure_value);
                true
            }
            Ok(response) => {
                tracing::warn!(
                    device_id,
                    "{} submission rejected with status {}",
                    kind,
                    response.status()
                );
                false
            }
            Err(e) => {
                tracing::warn!(device_id, "{} submission failed: {}", kind, e);
                false
            }
        }
    }

    /// Post temperature, pressure and derived altitude for one reading, one
    /// call per metric, and fold the outcomes into a tick report.
    pub async fn report_sample(&self, reading: &SensorReading, device_id: i64) -> TickReport {
        let temperature = self
            .report(MetricKind::Temperature, reading.temperature_c, device_id)
            .await;
        let pressure = self
            .report(MetricKind::Pressure, reading.pressure_hpa, device_id)
            .await;
        let altitude = self
            .report(
                MetricKind::Altitude,
                reading.altitude_m(STANDARD_SEA_LEVEL_HPA),
                device_id,
            )
            .await;

        TickReport {
            temperature,
            pressure,
            altitude,
        }
    }
}
