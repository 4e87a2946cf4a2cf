use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::configs::Device;
use crate::services::{IdentityService, RegistryService, SampleCache, TelemetryService};
use crate::services::{TickOutcome, TickReport};

/// Registration phase of the node. The transition to `Registered` fires once
/// per persisted-state lifetime; clearing the identity store is the only way
/// back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePhase {
    Unregistered,
    Registered(i64),
}

/// What one cadence tick amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Metrics were submitted; per-metric outcomes inside
    Reported(TickReport),
    /// Sensor acquisition failed, nothing was submitted
    SensorSkipped,
    /// Still unregistered, registration will be retried next tick
    AwaitingRegistration,
}

/// Drives the periodic acquire-and-report cycle. Owns the phase state
/// explicitly; nothing about the node's identity lives in globals.
pub struct SamplingService {
    identity: Arc<IdentityService>,
    registry: Arc<RegistryService>,
    telemetry: Arc<TelemetryService>,
    cache: Arc<SampleCache>,
    device: Device,
    interval: Duration,
    phase: NodePhase,
}

impl SamplingService {
    pub fn new(
        identity: Arc<IdentityService>,
        registry: Arc<RegistryService>,
        telemetry: Arc<TelemetryService>,
        cache: Arc<SampleCache>,
        device: Device,
        interval: Duration,
    ) -> Self {
        Self {
            identity,
            registry,
            telemetry,
            cache,
            device,
            interval,
            phase: NodePhase::Unregistered,
        }
    }

    pub fn phase(&self) -> NodePhase {
        self.phase
    }

    /// Decide the boot phase from the identity store. A persisted identifier
    /// means the registry is never contacted again for this state lifetime.
    pub async fn boot(&mut self) {
        self.phase = match self.identity.load().await {
            Some(device_id) => {
                tracing::info!(device_id, "restored persisted device identity");
                NodePhase::Registered(device_id)
            }
            None => {
                tracing::info!("no persisted identity, node starts unregistered");
                NodePhase::Unregistered
            }
        };
    }

    pub async fn run(mut self) {
        self.boot().await;

        let mut ticker = time::interval(self.interval);
        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    /// One cadence tick. While unregistered this retries registration (and
    /// still reads the sensor for local diagnostics); while registered it
    /// acquires a fresh reading and reports all three metrics.
    pub async fn tick(&mut self) -> TickResult {
        if self.phase == NodePhase::Unregistered {
            match self
                .registry
                .resolve_or_create(
                    &self.device.mac_address,
                    &self.device.nom,
                    self.device.location.as_deref(),
                )
                .await
            {
                Ok(device_id) => {
                    if let Err(e) = self.identity.save(device_id).await {
                        // id is still valid for this session; find-or-create
                        // makes the next boot converge on the same entry
                        tracing::warn!(device_id, "failed to persist identity: {}", e);
                    }
                    self.phase = NodePhase::Registered(device_id);
                    tracing::info!(device_id, "registered with remote registry");
                }
                Err(e) => {
                    tracing::warn!("registration attempt failed: {}", e);
                    // diagnostics read keeps the status page alive meanwhile
                    let _ = self.cache.acquire().await;
                    return TickResult::AwaitingRegistration;
                }
            }
        }

        let NodePhase::Registered(device_id) = self.phase else {
            return TickResult::AwaitingRegistration;
        };

        let reading = match self.cache.acquire().await {
            Ok(reading) => reading,
            Err(e) => {
                tracing::warn!("sensor acquisition failed, skipping tick: {}", e);
                return TickResult::SensorSkipped;
            }
        };

        let report = self.telemetry.report_sample(&reading, device_id).await;
        match report.outcome() {
            TickOutcome::Delivered => {
                tracing::debug!(
                    device_id,
                    "tick delivered: {:.2} C, {:.2} hPa",
                    reading.temperature_c,
                    reading.pressure_hpa
                );
            }
            TickOutcome::Partial => {
                tracing::warn!(
                    device_id,
                    "partial delivery (temperature={}, pressure={}, altitude={})",
                    report.temperature,
                    report.pressure,
                    report.altitude
                );
            }
            TickOutcome::Failed => {
                tracing::warn!(device_id, "no metric accepted this tick");
            }
        }

        TickResult::Reported(report)
    }

    /// Explicit operator reset: erase the persisted identifier and fall back
    /// to `Unregistered`.
    pub async fn reset_identity(&mut self) -> Result<(), sqlx::Error> {
        self.identity.clear().await?;
        self.phase = NodePhase::Unregistered;

        tracing::warn!("device identity cleared by operator request");

        Ok(())
    }
}
