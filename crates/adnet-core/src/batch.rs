//! Bulk replacement of country priorities.

use adnet_types::{BatchFailure, CountryCode, PriorityError, PriorityRecord};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::cache::ResolutionCache;
use crate::metrics::record_batch_update;
use crate::store::PriorityStore;

/// Validates a batch, writes it entry by entry, then flushes the cache.
pub struct BatchUpdater {
    store: Arc<PriorityStore>,
    cache: Arc<ResolutionCache>,
}

impl BatchUpdater {
    pub fn new(store: Arc<PriorityStore>, cache: Arc<ResolutionCache>) -> Self {
        Self { store, cache }
    }

    /// Persist every entry of `batch`.
    ///
    /// All keys are validated before the first write; one bad key rejects
    /// the whole batch. Writes are independent: a failed entry does not undo
    /// the others. The cache is flushed once after all writes, whether or
    /// not they succeeded. Returns the number of countries written.
    pub async fn update(
        &self,
        batch: BTreeMap<String, PriorityRecord>,
    ) -> Result<usize, PriorityError> {
        let entries = validate(batch).inspect_err(|_| record_batch_update("rejected"))?;
        let attempted = entries.len();

        let mut failures = Vec::new();
        for (country, record) in &entries {
            if let Err(err) = self.store.set(country, record).await {
                tracing::error!("[BatchUpdater] Failed to store {}: {}", country, err);
                failures.push(BatchFailure { country: country.to_string(), message: err.to_string() });
            }
        }

        self.cache.invalidate_all();

        if failures.is_empty() {
            record_batch_update("ok");
            tracing::info!("[BatchUpdater] Updated priorities for {} countries", attempted);
            Ok(attempted)
        } else {
            record_batch_update("partial");
            tracing::warn!(
                "[BatchUpdater] {} of {} countries failed to update",
                failures.len(),
                attempted
            );
            Err(PriorityError::PartialBatchFailure { attempted, failures })
        }
    }
}

fn validate(
    batch: BTreeMap<String, PriorityRecord>,
) -> Result<Vec<(CountryCode, PriorityRecord)>, PriorityError> {
    batch
        .into_iter()
        .map(|(raw, record)| CountryCode::parse(&raw).map(|country| (country, record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResolutionKey;
    use crate::store::test_backend::{FailOn, FaultyBackend};
    use std::time::Duration;

    fn batch(entries: &[(&str, PriorityRecord)]) -> BTreeMap<String, PriorityRecord> {
        entries.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect()
    }

    fn record() -> PriorityRecord {
        PriorityRecord::from_lists(["AdMob"], ["AdMob"], ["AdMob"])
    }

    async fn warm(cache: &ResolutionCache) {
        let key = ResolutionKey::new(CountryCode::parse("ZZ").unwrap(), None, None);
        cache.get_or_compute(key, || async { Ok::<_, PriorityError>(record()) }).await.unwrap();
    }

    #[tokio::test]
    async fn test_writes_all_and_flushes_cache() {
        let store = Arc::new(PriorityStore::in_memory());
        let cache = Arc::new(ResolutionCache::new());
        warm(&cache).await;
        let updater = BatchUpdater::new(store.clone(), cache.clone());

        let written = updater.update(batch(&[("AA", record()), ("BB", record())])).await.unwrap();

        assert_eq!(written, 2);
        assert!(cache.is_empty());
        assert_eq!(store.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_key_rejects_batch_without_store_access() {
        let backend = Arc::new(FaultyBackend::new(FailOn::ValueWrites(Vec::new())));
        let store = Arc::new(PriorityStore::new(backend.clone(), Duration::from_secs(1)));
        let cache = Arc::new(ResolutionCache::new());
        warm(&cache).await;
        let updater = BatchUpdater::new(store, cache.clone());

        for bad in ["USA", "us", "U1", "U"] {
            let err = updater.update(batch(&[("AA", record()), (bad, record())])).await.unwrap_err();
            assert_eq!(err, PriorityError::InvalidCountryCode { code: bad.to_string() });
        }

        assert_eq!(backend.calls(), 0);
        assert_eq!(cache.len(), 1, "rejected batch must not touch the cache");
    }

    #[tokio::test]
    async fn test_partial_failure_reports_keys_and_still_flushes() {
        let backend = Arc::new(FaultyBackend::new(FailOn::ValueWrites(vec!["BB".to_string()])));
        let store = Arc::new(PriorityStore::new(backend.clone(), Duration::from_secs(1)));
        let cache = Arc::new(ResolutionCache::new());
        warm(&cache).await;
        let updater = BatchUpdater::new(store.clone(), cache.clone());

        let err = updater
            .update(batch(&[("AA", record()), ("BB", record()), ("CC", record())]))
            .await
            .unwrap_err();

        match &err {
            PriorityError::PartialBatchFailure { attempted, failures } => {
                assert_eq!(*attempted, 3);
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].country, "BB");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(cache.is_empty());
        // No rollback of the entries that went through.
        assert!(store.get(&CountryCode::parse("AA").unwrap()).await.unwrap().is_some());
        assert!(store.get(&CountryCode::parse("CC").unwrap()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_index_write_failure_keeps_value_and_reports_country() {
        let backend = Arc::new(FaultyBackend::new(FailOn::IndexWrites));
        let store = Arc::new(PriorityStore::new(backend, Duration::from_secs(1)));
        let cache = Arc::new(ResolutionCache::new());
        warm(&cache).await;
        let updater = BatchUpdater::new(store.clone(), cache.clone());

        let err = updater.update(batch(&[("AA", record())])).await.unwrap_err();

        assert_eq!(err.failed_countries(), vec!["AA"]);
        assert!(matches!(err, PriorityError::PartialBatchFailure { attempted: 1, .. }));
        // The value write went through before the index write failed.
        let aa = CountryCode::parse("AA").unwrap();
        assert_eq!(store.get(&aa).await.unwrap(), Some(record()));
        assert!(store.get_all().await.unwrap().is_empty());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_still_flushes() {
        let cache = Arc::new(ResolutionCache::new());
        warm(&cache).await;
        let updater = BatchUpdater::new(Arc::new(PriorityStore::in_memory()), cache.clone());

        assert_eq!(updater.update(BTreeMap::new()).await.unwrap(), 0);
        assert!(cache.is_empty());
    }
}
