mod device;
mod measure;
mod reading;

pub use device::*;
pub use measure::*;
pub use reading::*;

/// Identifier type assigned by the remote registry.
pub type Id = i64;
