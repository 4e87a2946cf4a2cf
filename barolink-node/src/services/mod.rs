mod cache_service;
mod identity_service;
mod registry_service;
mod sampling_service;
mod telemetry_service;

pub use cache_service::SampleCache;
pub use identity_service::IdentityService;
pub use registry_service::RegistryService;
pub use sampling_service::{NodePhase, SamplingService, TickResult};
pub use telemetry_service::{TelemetryService, TickOutcome, TickReport};
