use barolink_api::{CreateDeviceRequest, DeviceRecord};
use reqwest::Client;

use crate::errors::RegistryError;

/// Find-or-create resolution against the remote device registry. Stateless:
/// the resolved identifier is handed back to the caller, never persisted here.
pub struct RegistryService {
    client: Client,
    base_url: String,
}

impl RegistryService {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self { client, base_url }
    }

    /// Resolve this node's registry identifier: reuse the existing entry whose
    /// `mac_address` field equals `mac_address`, otherwise create one. A
    /// failed or unparseable listing falls through to creation; a failed
    /// creation is the caller's cue to retry on a later tick.
    pub async fn resolve_or_create(
        &self,
        mac_address: &str,
        nom: &str,
        location: Option<&str>,
    ) -> Result<i64, RegistryError> {
        match self.list_devices().await {
            Ok(devices) => {
                if let Some(existing) = devices
                    .iter()
                    .find(|device| device.mac_address == mac_address)
                {
                    tracing::debug!(
                        device_id = existing.id,
                        "reusing existing registry entry for {}",
                        mac_address
                    );
                    return Ok(existing.id);
                }
            }
            Err(e) => {
                tracing::warn!("registry listing failed, falling back to creation: {}", e);
            }
        }

        self.create_device(mac_address, nom, location).await
    }

    async fn list_devices(&self) -> Result<Vec<DeviceRecord>, RegistryError> {
        let response = self
            .client
            .get(format!("{}/devices/", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::UnexpectedStatus(status.as_u16()));
        }

        response
            .json::<Vec<DeviceRecord>>()
            .await
            .map_err(|e| RegistryError::MalformedResponse(e.to_string()))
    }

    async fn create_device(
        &self,
        mac_address: &str,
        nom: &str,
        location: Option<&str>,
    ) -> Result<i64, RegistryError> {
        let payload = CreateDeviceRequest {
            nom: nom.to_string(),
            mac_address: mac_address.to_string(),
            location: location.map(str::to_string),
        };

        let response = self
            .client
            .post(format!("{}/devices/", self.base_url))
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !matches!(status, 200 | 201) {
            return Err(RegistryError::UnexpectedStatus(status));
        }

        let created = response
            .json::<DeviceRecord>()
            .await
            .map_err(|e| RegistryError::MalformedResponse(e.to_string()))?;

        tracing::info!(device_id = created.id, "created registry entry for {}", mac_address);

        Ok(created.id)
    }
}
