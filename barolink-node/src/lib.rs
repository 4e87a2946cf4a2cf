use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::app::create_app;
use crate::configs::{Settings, Storage};
use crate::errors::NodeError;
use crate::sensors::{Sensor, SimulatedSensor};
use crate::services::{
    IdentityService, RegistryService, SampleCache, SamplingService, TelemetryService,
};

pub mod app;
pub mod configs;
pub mod errors;
pub mod handles;
pub mod sensors;
pub mod services;

pub async fn run(settings: &Arc<Settings>) -> Result<(), NodeError> {
    let storage = Arc::new(Storage::new(settings.database.clone()).await?);
    let identity = Arc::new(IdentityService::new(storage.clone()));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.registry.timeout_secs))
        .build()?;
    let registry = Arc::new(RegistryService::new(
        client.clone(),
        settings.registry.base_url.clone(),
    ));
    let telemetry = Arc::new(TelemetryService::new(
        client,
        settings.registry.base_url.clone(),
    ));

    let sensor: Arc<dyn Sensor> = Arc::new(SimulatedSensor::new());
    let cache = Arc::new(SampleCache::new(
        sensor,
        Duration::from_millis(settings.sampling.staleness_ms),
    ));

    let sampler = SamplingService::new(
        identity,
        registry,
        telemetry,
        cache.clone(),
        settings.device.clone(),
        Duration::from_secs(settings.sampling.interval_secs),
    );
    tokio::spawn(sampler.run());

    let app = create_app(cache);

    let ip_addr = settings
        .server
        .host
        .parse::<IpAddr>()
        .map_err(|e| NodeError::Config(format!("invalid server host: {e}")))?;

    let address = SocketAddr::from((ip_addr, settings.server.port));

    let listener = TcpListener::bind(&address).await?;

    tracing::info!("status page listening on {:?}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
