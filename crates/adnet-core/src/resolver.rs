//! Resolution of the client-facing priority record for one request.

use adnet_types::{AdType, PriorityError, PriorityRecord};
use std::sync::Arc;

use crate::cache::ResolutionKey;
use crate::fallback::FallbackTable;
use crate::filter::{filter_networks, FilterContext};
use crate::store::PriorityStore;

/// Combines stored data (or the fallback) with the filter pipeline.
pub struct PriorityResolver {
    store: Arc<PriorityStore>,
    fallback: FallbackTable,
}

impl PriorityResolver {
    pub fn new(store: Arc<PriorityStore>, fallback: FallbackTable) -> Self {
        Self { store, fallback }
    }

    pub fn fallback(&self) -> &FallbackTable {
        &self.fallback
    }

    /// Fully populated, filtered record for `key`.
    ///
    /// A missing record falls back to defaults; a failing store does not.
    pub async fn resolve(&self, key: &ResolutionKey) -> Result<PriorityRecord, PriorityError> {
        let stored = self.store.get(&key.country).await?;
        if stored.is_none() {
            tracing::debug!("[PriorityResolver] No data for {}, using fallback", key.country);
        }
        Ok(self.apply(key, stored.as_ref()))
    }

    /// Pure part of resolution: fill gaps from the fallback and filter each list.
    pub fn apply(&self, key: &ResolutionKey, stored: Option<&PriorityRecord>) -> PriorityRecord {
        let ctx = FilterContext {
            country: &key.country,
            platform: key.platform,
            os_version: key.os_version.as_deref(),
        };

        AdType::ALL
            .into_iter()
            .map(|ad_type| {
                let networks = stored
                    .and_then(|record| record.get(ad_type))
                    .unwrap_or_else(|| self.fallback.networks(ad_type));
                (ad_type, filter_networks(&ctx, networks))
            })
            .collect()
    }
}
