//! Entry point used by the HTTP layer and the CLI.

use adnet_types::{CountryCode, Platform, PriorityError, PriorityRecord};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::batch::BatchUpdater;
use crate::cache::{CacheStats, ResolutionCache, ResolutionKey};
use crate::fallback::FallbackTable;
use crate::resolver::PriorityResolver;
use crate::store::PriorityStore;

/// Owns the store, resolver, cache and batch updater for one process.
pub struct PriorityService {
    store: Arc<PriorityStore>,
    cache: Arc<ResolutionCache>,
    resolver: PriorityResolver,
    updater: BatchUpdater,
}

impl PriorityService {
    pub fn new(store: PriorityStore) -> Self {
        let store = Arc::new(store);
        let cache = Arc::new(ResolutionCache::new());
        Self {
            resolver: PriorityResolver::new(store.clone(), FallbackTable::new()),
            updater: BatchUpdater::new(store.clone(), cache.clone()),
            store,
            cache,
        }
    }

    /// Resolved priorities for a raw country code from outside the core.
    /// Malformed codes are rejected before the store is touched.
    pub async fn get_priorities(
        &self,
        country: &str,
        platform: Option<Platform>,
        os_version: Option<&str>,
    ) -> Result<PriorityRecord, PriorityError> {
        let country = CountryCode::parse(country)?;
        self.resolve(ResolutionKey::new(country, platform, os_version.map(str::to_string))).await
    }

    /// Cached resolution for an already validated key.
    pub async fn resolve(&self, key: ResolutionKey) -> Result<PriorityRecord, PriorityError> {
        let resolver = &self.resolver;
        let lookup = key.clone();
        self.cache.get_or_compute(key, || async move { resolver.resolve(&lookup).await }).await
    }

    /// Raw stored records for every indexed country. Not filtered, not cached.
    pub async fn list_all(&self) -> Result<BTreeMap<CountryCode, PriorityRecord>, PriorityError> {
        Ok(self.store.get_all().await?)
    }

    /// Replace priorities for every country in `batch`.
    pub async fn update(
        &self,
        batch: BTreeMap<String, PriorityRecord>,
    ) -> Result<usize, PriorityError> {
        self.updater.update(batch).await
    }

    /// Remove a country's record and index entry. Cleanup only; flushes the cache.
    pub async fn delete(&self, country: &str) -> Result<bool, PriorityError> {
        let country = CountryCode::parse(country)?;
        let result = self.store.delete(&country).await;
        self.cache.invalidate_all();
        let existed = result?;
        tracing::info!("[PriorityService] Deleted {} (existed: {})", country, existed);
        Ok(existed)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn store_backend(&self) -> &'static str {
        self.store.backend_name()
    }
}
