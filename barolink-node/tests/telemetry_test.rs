use barolink_api::{MetricKind, SensorReading};
use barolink_mock::registry::MockRegistry;
use barolink_node::services::{TelemetryService, TickOutcome};

mod common;
use common::{TEST_MAC, http_client, spawn_registry};

#[tokio::test]
async fn test_report_without_identity_short_circuits() {
    let mock = MockRegistry::new();
    let base_url = spawn_registry(&mock).await;

    let telemetry = TelemetryService::new(http_client(), &base_url);

    assert!(!telemetry.report(MetricKind::Temperature, 21.5, 0).await);
    assert!(!telemetry.report(MetricKind::Pressure, 1010.0, -3).await);

    // nothing ever reached the wire
    assert_eq!(mock.measure_calls(), 0);
}

#[tokio::test]
async fn test_partial_failure_keeps_successful_metrics() {
    let mock = MockRegistry::new();
    let device_id = mock.seed_device("test-node", TEST_MAC, None);
    mock.reject_kind(MetricKind::Temperature);
    let base_url = spawn_registry(&mock).await;

    let telemetry = TelemetryService::new(http_client(), &base_url);
    let reading = SensorReading::new(18.3, 1004.7);

    let report = telemetry.report_sample(&reading, device_id).await;

    assert!(!report.temperature);
    assert!(report.pressure);
    assert!(report.altitude);
    assert_eq!(report.outcome(), TickOutcome::Partial);

    // the two accepted metrics stay accepted, nothing retried
    assert_eq!(mock.measure_calls(), 3);
    let measures = mock.measures();
    assert_eq!(measures.len(), 2);
    assert!(measures.iter().all(|m| m.kind != MetricKind::Temperature));
}

#[tokio::test]
async fn test_reported_values_are_rounded_to_two_decimals() {
    let mock = MockRegistry::new();
    let device_id = mock.seed_device("test-node", TEST_MAC, None);
    let base_url = spawn_registry(&mock).await;

    let telemetry = TelemetryService::new(http_client(), &base_url);

    assert!(
        telemetry
            .report(MetricKind::Temperature, 21.98765, device_id)
            .await
    );

    let measures = mock.measures();
    assert_eq!(measures.len(), 1);
    assert_eq!(measures[0].mesure_value, 21.99);
    assert_eq!(measures[0].device_id, device_id);
}

#[tokio::test]
async fn test_unreachable_collector_reports_failure_for_every_metric() {
    // no server behind this port
    let telemetry = TelemetryService::new(http_client(), "http://127.0.0.1:1");
    let reading = SensorReading::new(18.3, 1004.7);

    let report = telemetry.report_sample(&reading, 1).await;

    assert_eq!(report.outcome(), TickOutcome::Failed);
}
