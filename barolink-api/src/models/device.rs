use serde::{Deserialize, Serialize};

use super::Id;

/// One element of the registry device listing.
///
/// The registry returns richer records (creation time, embedded measures);
/// only the fields the node matches on are deserialized, everything else is
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Registry-assigned identifier
    pub id: Id,
    /// Device display name
    pub nom: String,
    /// Hardware address, canonical colon-separated hex
    pub mac_address: String,
    /// Free-form placement label
    pub location: Option<String>,
}

/// Payload for the registry creation endpoint. Field names follow the wire
/// format of the collection API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeviceRequest {
    pub nom: String,
    pub mac_address: String,
    pub location: Option<String>,
}
