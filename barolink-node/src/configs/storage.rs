use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Error, SqlitePool};

use crate::configs::settings::Database;

/// Durable node-local state. One small SQLite database holding scalar values
/// under `(namespace, key)`; single-key writes are atomic, so a power loss
/// never exposes a half-written identifier.
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub async fn new(database: Database) -> Result<Self, Error> {
        // single connection: load/save/clear must be mutually exclusive, and
        // an in-memory db exists per connection
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .connect(&database.url)
            .await?;

        Self::create_schema(&pool, &database).await?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create_schema(pool: &SqlitePool, database: &Database) -> Result<(), Error> {
        if database.clean_start {
            sqlx::query("DROP TABLE IF EXISTS node_state")
                .execute(pool)
                .await?;

            tracing::warn!("perform a clean boot: node state erased");
        }

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS node_state (
                namespace TEXT NOT NULL,
                key TEXT NOT NULL,
                value INTEGER NOT NULL,
                PRIMARY KEY (namespace, key)
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
