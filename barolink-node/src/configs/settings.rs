use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub nom: String,
    pub mac_address: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sampling {
    pub interval_secs: u64,
    pub staleness_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub url: String,
    pub clean_start: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub registry: Registry,
    pub device: Device,
    pub sampling: Sampling,
    pub database: Database,
}

impl Settings {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let defaults: Settings = toml::from_str(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/default.toml"
        )))?;

        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());
        let overlay_path = format!("configs/{run_mode}.toml");

        let settings: Settings = if Path::new(&overlay_path).is_file() {
            let overlay: toml::Value = toml::from_str(&fs::read_to_string(&overlay_path)?)?;

            Self::merge(defaults, overlay)?
        } else {
            defaults
        };

        settings.validate()?;

        Ok(settings)
    }

    /// A zero cadence would panic the interval timer at task start.
    fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.sampling.interval_secs == 0 {
            return Err("sampling.interval_secs must be at least 1".into());
        }

        Ok(())
    }

    /// Shallow section-level merge: non-null top-level entries of `right`
    /// replace those of `left`.
    pub fn merge<L, R, T>(left: L, right: R) -> Result<T, Box<dyn Error>>
    where
        L: Serialize,
        R: Serialize,
        T: Serialize + DeserializeOwned,
    {
        let mut left_map = serde_json::to_value(&left)?
            .as_object()
            .map(|map| map.to_owned())
            .ok_or("Failed to serialize left value which is not an object")?;

        let mut right_map = serde_json::to_value(&right)?
            .as_object()
            .map(|map| map.to_owned())
            .ok_or("Failed to serialize right value which is not an object")?;

        right_map.retain(|_, v| !v.is_null());
        left_map.extend(right_map);

        let value = serde_json::to_value(&left_map)?;

        Ok(serde_json::from_value(value)?)
    }
}
