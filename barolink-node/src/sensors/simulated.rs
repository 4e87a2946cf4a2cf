use async_trait::async_trait;
use barolink_api::SensorReading;
use time::OffsetDateTime;

use crate::errors::SensorError;
use crate::sensors::Sensor;

const MEAN_TEMPERATURE_C: f64 = 14.0;
const TEMPERATURE_SWING_C: f64 = 7.0;
const MEAN_PRESSURE_HPA: f64 = 1012.0;
const PRESSURE_SWING_HPA: f64 = 3.5;

/// Stand-in for the BMP280 driver: smooth diurnal temperature and pressure
/// curves derived from the time of day. The coldest point sits just before
/// sunrise, the semidiurnal pressure wave peaks mid-morning and late evening.
pub struct SimulatedSensor;

impl SimulatedSensor {
    pub fn new() -> Self {
        Self
    }

    fn reading_at(day_fraction: f64) -> SensorReading {
        let radians = day_fraction * 2.0 * std::f64::consts::PI;

        // Daily minimum around 05:00, maximum around 17:00
        let temperature =
            MEAN_TEMPERATURE_C - TEMPERATURE_SWING_C * (radians + 0.25 * std::f64::consts::PI).cos();

        // Atmospheric tide: two pressure maxima per day
        let pressure = MEAN_PRESSURE_HPA + PRESSURE_SWING_HPA * (2.0 * radians).cos();

        SensorReading::new(temperature, pressure)
    }
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Sensor for SimulatedSensor {
    async fn is_available(&self) -> bool {
        true
    }

    async fn acquire(&self) -> Result<SensorReading, SensorError> {
        let now = OffsetDateTime::now_utc();
        let seconds_since_midnight = now.hour() as f64 * 3600.0
            + now.minute() as f64 * 60.0
            + now.second() as f64;
        let day_fraction = seconds_since_midnight / 86400.0;

        Ok(Self::reading_at(day_fraction))
    }
}
