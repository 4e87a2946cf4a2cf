#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("sensor not available")]
    Unavailable,

    #[error("sensor read failed: {0}")]
    Read(String),
}
