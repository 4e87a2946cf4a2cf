mod settings;
mod storage;

pub use settings::{Database, Device, Registry, Sampling, Settings};
pub use storage::Storage;
