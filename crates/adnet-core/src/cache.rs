//! Memoized resolver output.
//!
//! Keyed by the full `(country, platform, os_version)` tuple and flushed as a
//! whole on every write. No TTL, no per-key invalidation.

use adnet_types::{CountryCode, Platform, PriorityRecord};
use dashmap::DashMap;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::record_resolution_cache;

/// Cache key: one entry per distinct request shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolutionKey {
    pub country: CountryCode,
    pub platform: Option<Platform>,
    pub os_version: Option<String>,
}

impl ResolutionKey {
    pub fn new(country: CountryCode, platform: Option<Platform>, os_version: Option<String>) -> Self {
        Self { country, platform, os_version }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub flushes: u64,
}

impl CacheStats {
    /// Fraction of lookups served from cache.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}

/// Shared resolution cache.
///
/// Concurrent misses on the same key may compute twice; the last insert wins.
/// Results computed before an [`invalidate_all`](Self::invalidate_all) are
/// dropped instead of inserted when the flush is observed in time.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: DashMap<ResolutionKey, PriorityRecord>,
    generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached record for `key`, or run `compute` and cache its
    /// result. Errors are returned as-is and never cached.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: ResolutionKey,
        compute: F,
    ) -> Result<PriorityRecord, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<PriorityRecord, E>>,
    {
        if let Some(hit) = self.entries.get(&key).map(|e| e.value().clone()) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            record_resolution_cache("hit");
            return Ok(hit);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        record_resolution_cache("miss");

        let generation = self.generation.load(Ordering::Acquire);
        let record = compute().await?;

        if self.generation.load(Ordering::Acquire) == generation {
            tracing::debug!(
                "[ResolutionCache] Caching {} platform={:?} os_version={:?}",
                key.country,
                key.platform,
                key.os_version
            );
            self.entries.insert(key, record.clone());
            record_resolution_cache("store");
        } else {
            tracing::debug!("[ResolutionCache] Flushed during computation, not caching {}", key.country);
        }

        Ok(record)
    }

    /// Drop every entry. Returns how many were removed.
    pub fn invalidate_all(&self) -> usize {
        self.generation.fetch_add(1, Ordering::AcqRel);
        let removed = self.entries.len();
        self.entries.clear();
        record_resolution_cache("flush");
        tracing::info!("[ResolutionCache] Invalidated {} entries", removed);
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
            flushes: self.generation.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adnet_types::PriorityError;
    use std::sync::atomic::AtomicUsize;

    fn key(country: &str, platform: Option<Platform>, os: Option<&str>) -> ResolutionKey {
        ResolutionKey::new(CountryCode::parse(country).unwrap(), platform, os.map(str::to_string))
    }

    fn record(tag: &str) -> PriorityRecord {
        PriorityRecord::from_lists([tag], [tag], [tag])
    }

    #[tokio::test]
    async fn test_second_lookup_is_a_hit() {
        let cache = ResolutionCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let counter = &calls;
            let out = cache
                .get_or_compute(key("US", None, None), || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, PriorityError>(record("A"))
                })
                .await
                .unwrap();
            assert_eq!(out, record("A"));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
        assert!((stats.hit_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_keys_differ_by_platform_and_os() {
        let cache = ResolutionCache::new();
        let keys = [
            key("US", None, None),
            key("US", Some(Platform::Android), None),
            key("US", Some(Platform::Android), Some("9.0")),
            key("US", Some(Platform::Ios), Some("9.0")),
        ];
        for (i, k) in keys.into_iter().enumerate() {
            let tag = i.to_string();
            cache
                .get_or_compute(k, || async move { Ok::<_, PriorityError>(record(&tag)) })
                .await
                .unwrap();
        }
        assert_eq!(cache.len(), 4);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = ResolutionCache::new();
        let err = cache
            .get_or_compute(key("US", None, None), || async {
                Err(PriorityError::StoreUnavailable { message: "down".to_string() })
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PriorityError::StoreUnavailable { .. }));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_invalidate_all_forces_recompute() {
        let cache = ResolutionCache::new();
        cache
            .get_or_compute(key("US", None, None), || async { Ok::<_, PriorityError>(record("old")) })
            .await
            .unwrap();
        cache
            .get_or_compute(key("DE", None, None), || async { Ok::<_, PriorityError>(record("old")) })
            .await
            .unwrap();

        assert_eq!(cache.invalidate_all(), 2);
        assert!(cache.is_empty());

        let out = cache
            .get_or_compute(key("US", None, None), || async { Ok::<_, PriorityError>(record("new")) })
            .await
            .unwrap();
        assert_eq!(out, record("new"));
        assert_eq!(cache.stats().flushes, 1);
    }

    #[tokio::test]
    async fn test_flush_during_compute_skips_insert() {
        let cache = ResolutionCache::new();
        let shared = &cache;
        let out = cache
            .get_or_compute(key("US", None, None), || async move {
                shared.invalidate_all();
                Ok::<_, PriorityError>(record("stale"))
            })
            .await
            .unwrap();
        assert_eq!(out, record("stale"));
        assert!(cache.is_empty());
    }
}
