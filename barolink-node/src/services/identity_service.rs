use std::sync::Arc;

use sqlx::Row;

use crate::configs::Storage;

const NAMESPACE: &str = "iot-device";
const KEY: &str = "device_id";

/// Single writer over the persisted device identifier. The registry client
/// never touches storage; whoever resolves an identifier hands it here.
pub struct IdentityService {
    storage: Arc<Storage>,
}

impl IdentityService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Persisted remote identifier, or `None` if the node never registered.
    /// Storage failures degrade to `None` so a broken flash page costs a
    /// re-registration, not a crash.
    pub async fn load(&self) -> Option<i64> {
        let result = sqlx::query("SELECT value FROM node_state WHERE namespace = $1 AND key = $2")
            .bind(NAMESPACE)
            .bind(KEY)
            .fetch_optional(self.storage.get_pool())
            .await;

        match result {
            Ok(row) => row.map(|row| row.get::<i64, _>("value")),
            Err(e) => {
                tracing::warn!("identity load failed, treating as unregistered: {}", e);
                None
            }
        }
    }

    /// Durably record a registry-confirmed identifier.
    pub async fn save(&self, device_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO node_state (namespace, key, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (namespace, key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(NAMESPACE)
        .bind(KEY)
        .bind(device_id)
        .execute(self.storage.get_pool())
        .await?;

        Ok(())
    }

    /// Erase the identifier. Manual operator path back to unregistered.
    pub async fn clear(&self) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM node_state WHERE namespace = $1 AND key = $2")
            .bind(NAMESPACE)
            .bind(KEY)
            .execute(self.storage.get_pool())
            .await?;

        Ok(())
    }
}
