//! Priority storage over a key-value backend.
//!
//! Layout:
//! - `priorities:countries:<CC>` holds the JSON-encoded [`PriorityRecord`]
//! - `priorities:all_countries` is a set of every country ever written
//!
//! A write touches both keys with two separate backend calls. Readers that
//! enumerate the index can therefore see a country whose value is not there
//! yet (or anymore); such countries are treated as having no data.

mod memory;
mod postgres;
#[cfg(any(test, feature = "testing"))]
pub mod test_backend;

pub use memory::MemoryBackend;
pub use postgres::PostgresBackend;

use adnet_types::{CountryCode, PriorityError, PriorityRecord, StoreBackend, StoreConfig};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::metrics::record_store_error;

pub const COUNTRY_KEY_PREFIX: &str = "priorities:countries";
pub const COUNTRIES_SET_KEY: &str = "priorities:all_countries";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Store call `{op}` exceeded the {timeout_ms}ms deadline")]
    Timeout { op: &'static str, timeout_ms: u64 },
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<StoreError> for PriorityError {
    fn from(err: StoreError) -> Self {
        PriorityError::StoreUnavailable { message: err.to_string() }
    }
}

/// Raw string values and string sets, the subset of a Redis-style store
/// the priority layout needs.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    async fn get_value(&self, key: &str) -> StoreResult<Option<String>>;
    async fn set_value(&self, key: &str, value: String) -> StoreResult<()>;
    /// Returns whether a value was removed.
    async fn delete_value(&self, key: &str) -> StoreResult<bool>;
    async fn set_add(&self, key: &str, member: &str) -> StoreResult<()>;
    async fn set_members(&self, key: &str) -> StoreResult<Vec<String>>;
    async fn set_remove(&self, key: &str, member: &str) -> StoreResult<()>;
    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

pub fn country_key(country: &CountryCode) -> String {
    format!("{}:{}", COUNTRY_KEY_PREFIX, country)
}

/// Country → [`PriorityRecord`] mapping with a secondary index of known countries.
///
/// Every backend call runs under `timeout`; an expired deadline is reported
/// as [`StoreError::Timeout`], never as "no data".
pub struct PriorityStore {
    backend: Arc<dyn KeyValueBackend>,
    timeout: Duration,
}

impl PriorityStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// In-memory store with the default deadline.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()), Duration::from_millis(StoreConfig::default().timeout_ms))
    }

    /// Build the store selected by configuration, connecting if needed.
    pub async fn open(config: &StoreConfig) -> StoreResult<Self> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let backend: Arc<dyn KeyValueBackend> = match config.backend {
            StoreBackend::Memory => Arc::new(MemoryBackend::new()),
            StoreBackend::Postgres => {
                let url = config.database_url.as_deref().ok_or_else(|| {
                    StoreError::Backend("store.database_url is not set".to_string())
                })?;
                let backend = PostgresBackend::connect(url).await?;
                backend.ensure_schema().await?;
                Arc::new(backend)
            }
        };
        tracing::info!(
            "[PriorityStore] Using {} backend (deadline {}ms)",
            backend.name(),
            config.timeout_ms
        );
        Ok(Self::new(backend, timeout))
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    async fn call<T, F>(&self, op: &'static str, fut: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        let result = match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                op,
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        };
        if let Err(err) = &result {
            record_store_error(op);
            tracing::warn!("[PriorityStore] {} failed: {}", op, err);
        }
        result
    }

    /// Stored record for `country`, or `None` when there is none.
    pub async fn get(&self, country: &CountryCode) -> StoreResult<Option<PriorityRecord>> {
        let key = country_key(country);
        let raw = self.call("get", self.backend.get_value(&key)).await?;
        raw.map(|json| decode(&key, &json)).transpose()
    }

    /// Upsert the value, then add `country` to the index.
    ///
    /// The two writes are independent: if the index update fails the value
    /// is already stored and the error is still returned.
    pub async fn set(&self, country: &CountryCode, record: &PriorityRecord) -> StoreResult<()> {
        let key = country_key(country);
        let json =
            serde_json::to_string(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.call("set", self.backend.set_value(&key, json)).await?;
        self.call("index_add", self.backend.set_add(COUNTRIES_SET_KEY, country.as_str())).await?;
        tracing::debug!("[PriorityStore] Stored {} ({} ad types)", country, record.len());
        Ok(())
    }

    /// Every indexed country with a readable value. Countries whose value has
    /// disappeared since enumeration, or no longer decodes, are skipped.
    pub async fn get_all(&self) -> StoreResult<BTreeMap<CountryCode, PriorityRecord>> {
        let members = self.call("index_members", self.backend.set_members(COUNTRIES_SET_KEY)).await?;

        let mut all = BTreeMap::new();
        for member in members {
            let Ok(country) = CountryCode::parse(&member) else {
                tracing::warn!("[PriorityStore] Ignoring malformed index member {:?}", member);
                continue;
            };
            match self.get(&country).await {
                Ok(Some(record)) => {
                    all.insert(country, record);
                }
                Ok(None) => {
                    tracing::debug!("[PriorityStore] {} indexed without value, skipping", country);
                }
                Err(StoreError::Serialization(message)) => {
                    tracing::warn!("[PriorityStore] Skipping {}: {}", country, message);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(all)
    }

    /// Remove the value and the index membership. Returns whether a value existed.
    pub async fn delete(&self, country: &CountryCode) -> StoreResult<bool> {
        let key = country_key(country);
        let existed = self.call("delete", self.backend.delete_value(&key)).await?;
        self.call("index_remove", self.backend.set_remove(COUNTRIES_SET_KEY, country.as_str()))
            .await?;
        Ok(existed)
    }
}

fn decode(key: &str, json: &str) -> StoreResult<PriorityRecord> {
    serde_json::from_str(json)
        .map_err(|e| StoreError::Serialization(format!("corrupt value at {key}: {e}")))
}
