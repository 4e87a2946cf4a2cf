use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use barolink_api::SensorReading;
use barolink_mock::registry::MockRegistry;
use barolink_node::configs::{Database, Device, Storage};
use barolink_node::errors::SensorError;
use barolink_node::sensors::Sensor;
use barolink_node::services::{
    IdentityService, RegistryService, SampleCache, SamplingService, TelemetryService,
};
use tokio::net::TcpListener;

pub const TEST_MAC: &str = "AA:BB:CC:DD:EE:FF";

/// Serve a mock registry on an ephemeral local port, returning its base url.
pub async fn spawn_registry(registry: &MockRegistry) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let router = registry.router();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{address}")
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap()
}

pub async fn memory_identity() -> Arc<IdentityService> {
    let storage = Storage::new(Database {
        url: "sqlite::memory:".to_string(),
        clean_start: false,
    })
    .await
    .unwrap();

    Arc::new(IdentityService::new(Arc::new(storage)))
}

pub fn test_device() -> Device {
    Device {
        nom: "test-node".to_string(),
        mac_address: TEST_MAC.to_string(),
        location: Some("test bench".to_string()),
    }
}

/// Sensor that replays a scripted sequence of acquisition results, then keeps
/// failing once the script runs out.
pub struct ScriptedSensor {
    script: Mutex<Vec<Result<SensorReading, SensorError>>>,
}

impl ScriptedSensor {
    pub fn new(script: Vec<Result<SensorReading, SensorError>>) -> Self {
        Self {
            script: Mutex::new(script),
        }
    }

    pub fn steady(reading: SensorReading, ticks: usize) -> Self {
        Self::new((0..ticks).map(|_| Ok(reading)).collect())
    }
}

#[async_trait]
impl Sensor for ScriptedSensor {
    async fn is_available(&self) -> bool {
        true
    }

    async fn acquire(&self) -> Result<SensorReading, SensorError> {
        let mut script = self.script.lock().unwrap();
        if script.is_empty() {
            return Err(SensorError::Unavailable);
        }
        script.remove(0)
    }
}

pub fn build_sampler(
    base_url: &str,
    identity: Arc<IdentityService>,
    sensor: Arc<dyn Sensor>,
) -> SamplingService {
    let client = http_client();
    let registry = Arc::new(RegistryService::new(client.clone(), base_url));
    let telemetry = Arc::new(TelemetryService::new(client, base_url));
    let cache = Arc::new(SampleCache::new(sensor, Duration::from_millis(2000)));

    SamplingService::new(
        identity,
        registry,
        telemetry,
        cache,
        test_device(),
        Duration::from_secs(2),
    )
}
