use std::sync::Arc;
use std::time::{Duration, Instant};

use barolink_api::SensorReading;
use tokio::sync::RwLock;

use crate::errors::SensorError;
use crate::sensors::Sensor;

struct CachedReading {
    reading: SensorReading,
    taken_at: Instant,
}

/// Last acquired sample plus the on-demand refresh path for the status page.
/// The sampling loop always forces a fresh read; the status page only re-reads
/// when the cached value is older than the staleness threshold.
pub struct SampleCache {
    sensor: Arc<dyn Sensor>,
    staleness: Duration,
    inner: RwLock<Option<CachedReading>>,
}

impl SampleCache {
    pub fn new(sensor: Arc<dyn Sensor>, staleness: Duration) -> Self {
        Self {
            sensor,
            staleness,
            inner: RwLock::new(None),
        }
    }

    /// Force a fresh acquisition and cache it. Used by the sampling loop.
    /// Availability is probed first so a disconnected sensor fails fast
    /// instead of going through a doomed bus read.
    pub async fn acquire(&self) -> Result<SensorReading, SensorError> {
        if !self.sensor.is_available().await {
            return Err(SensorError::Unavailable);
        }

        let reading = self.sensor.acquire().await?;

        *self.inner.write().await = Some(CachedReading {
            reading,
            taken_at: Instant::now(),
        });

        Ok(reading)
    }

    pub async fn latest(&self) -> Option<SensorReading> {
        self.inner.read().await.as_ref().map(|cached| cached.reading)
    }

    /// Serve the cached reading, re-reading through the sensor only when the
    /// cache is missing or stale. A failed re-read falls back to whatever is
    /// cached rather than erroring the status page.
    pub async fn refresh_if_stale(&self) -> Option<SensorReading> {
        {
            let guard = self.inner.read().await;
            if let Some(cached) = guard.as_ref() {
                if cached.taken_at.elapsed() <= self.staleness {
                    return Some(cached.reading);
                }
            }
        }

        match self.acquire().await {
            Ok(reading) => Some(reading),
            Err(e) => {
                tracing::debug!("stale cache refresh failed: {}", e);
                self.latest().await
            }
        }
    }
}
