mod simulated;

pub use simulated::SimulatedSensor;

use async_trait::async_trait;
use barolink_api::SensorReading;

use crate::errors::SensorError;

/// Capability boundary around the physical barometric sensor. Availability is
/// probed explicitly instead of re-running driver init on every read.
#[async_trait]
pub trait Sensor: Send + Sync {
    async fn is_available(&self) -> bool;

    /// Acquire one calibrated temperature/pressure reading.
    async fn acquire(&self) -> Result<SensorReading, SensorError>;
}
