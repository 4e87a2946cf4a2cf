use std::fmt;

use serde::{Deserialize, Serialize};

use super::Id;

/// Metric category reported to the collection API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Temperature,
    Pressure,
    Altitude,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Temperature => write!(f, "temperature"),
            MetricKind::Pressure => write!(f, "pressure"),
            MetricKind::Altitude => write!(f, "altitude"),
        }
    }
}

/// Payload for the measurement submission endpoint. Values are rounded to
/// two decimal places before serialization, matching what the firmware sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMeasureRequest {
    #[serde(rename = "type")]
    pub kind: MetricKind,
    pub mesure_value: f64,
    pub device_id: Id,
}

impl CreateMeasureRequest {
    pub fn new(kind: MetricKind, value: f64, device_id: Id) -> Self {
        Self {
            kind,
            mesure_value: (value * 100.0).round() / 100.0,
            device_id,
        }
    }
}

/// A single measurement taken during one sampling tick. Ephemeral: built
/// fresh each tick, consumed synchronously, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementSample {
    pub kind: MetricKind,
    pub value: f64,
    pub device_id: Id,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MetricKind::Temperature).unwrap(),
            "\"temperature\""
        );
        assert_eq!(
            serde_json::to_string(&MetricKind::Pressure).unwrap(),
            "\"pressure\""
        );
        assert_eq!(
            serde_json::to_string(&MetricKind::Altitude).unwrap(),
            "\"altitude\""
        );
    }

    #[test]
    fn test_measure_request_rounds_to_two_decimals() {
        let request = CreateMeasureRequest::new(MetricKind::Temperature, 21.98765, 3);

        assert_eq!(request.mesure_value, 21.99);
        assert_eq!(request.device_id, 3);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["type"], "temperature");
        assert_eq!(body["mesure_value"], 21.99);
        assert_eq!(body["device_id"], 3);
    }
}
