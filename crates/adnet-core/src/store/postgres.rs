//! PostgreSQL implementation of the key-value backend.
//!
//! Values and set members live in two plain tables so the priority layout
//! keeps its Redis-style keys regardless of the backing service.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use super::{KeyValueBackend, StoreError, StoreResult};

/// PostgreSQL-backed key-value store.
pub struct PostgresBackend {
    /// Database connection pool.
    pool: PgPool,
}

impl PostgresBackend {
    /// Create backend with existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to database and create backend.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(300))
            .connect(database_url)
            .await
            .map_err(map_sqlx_err)?;
        Ok(Self::new(pool))
    }

    /// Create the key-value tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_values (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_set_members (
                key    TEXT NOT NULL,
                member TEXT NOT NULL,
                PRIMARY KEY (key, member)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        tracing::info!("[PostgresBackend] Schema ready");
        Ok(())
    }
}

fn map_sqlx_err(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl KeyValueBackend for PostgresBackend {
    async fn get_value(&self, key: &str) -> StoreResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT value FROM kv_values WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)
    }

    async fn set_value(&self, key: &str, value: String) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_values (key, value) VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn delete_value(&self, key: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM kv_values WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_add(&self, key: &str, member: &str) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO kv_set_members (key, member) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(key)
        .bind(member)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn set_members(&self, key: &str) -> StoreResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT member FROM kv_set_members WHERE key = $1 ORDER BY member",
        )
        .bind(key)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)
    }

    async fn set_remove(&self, key: &str, member: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM kv_set_members WHERE key = $1 AND member = $2")
            .bind(key)
            .bind(member)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
