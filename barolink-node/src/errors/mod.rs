mod registry;
mod sensor;

pub use registry::RegistryError;
pub use sensor::SensorError;

/// Top-level failure of node startup. Runtime failures inside the sampling
/// loop never surface here; the loop logs and continues.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}
