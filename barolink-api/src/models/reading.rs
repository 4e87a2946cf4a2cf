use serde::{Deserialize, Serialize};

/// Mean sea-level pressure used as the altitude reference, in hPa.
pub const STANDARD_SEA_LEVEL_HPA: f64 = 1013.25;

/// One calibrated acquisition from the barometric sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Temperature in degrees Celsius
    pub temperature_c: f64,
    /// Barometric pressure in hPa
    pub pressure_hpa: f64,
}

impl SensorReading {
    pub fn new(temperature_c: f64, pressure_hpa: f64) -> Self {
        Self {
            temperature_c,
            pressure_hpa,
        }
    }

    /// Altitude in meters derived from the international barometric formula,
    /// relative to the given sea-level reference pressure.
    pub fn altitude_m(&self, sea_level_hpa: f64) -> f64 {
        44330.0 * (1.0 - (self.pressure_hpa / sea_level_hpa).powf(1.0 / 5.255))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_altitude_is_zero_at_sea_level_pressure() {
        let reading = SensorReading::new(15.0, STANDARD_SEA_LEVEL_HPA);

        assert!(reading.altitude_m(STANDARD_SEA_LEVEL_HPA).abs() < 1e-9);
    }

    #[test]
    fn test_altitude_increases_as_pressure_drops() {
        let low = SensorReading::new(15.0, 1000.0);
        let lower = SensorReading::new(15.0, 950.0);

        let a1 = low.altitude_m(STANDARD_SEA_LEVEL_HPA);
        let a2 = lower.altitude_m(STANDARD_SEA_LEVEL_HPA);

        assert!(a1 > 0.0);
        assert!(a2 > a1);
        // 1000 hPa sits a bit above 100 m in the standard atmosphere
        assert!((a1 - 110.0).abs() < 15.0);
    }
}
