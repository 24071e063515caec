//! In-process key-value backend.

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::BTreeSet;

use super::{KeyValueBackend, StoreResult};

/// Concurrent maps standing in for an external key-value service.
/// Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: DashMap<String, String>,
    sets: DashMap<String, BTreeSet<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    async fn get_value(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.get(key).map(|v| v.value().clone()))
    }

    async fn set_value(&self, key: &str, value: String) -> StoreResult<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete_value(&self, key: &str) -> StoreResult<bool> {
        Ok(self.values.remove(key).is_some())
    }

    async fn set_add(&self, key: &str, member: &str) -> StoreResult<()> {
        self.sets.entry(key.to_string()).or_default().insert(member.to_string());
        Ok(())
    }

    async fn set_members(&self, key: &str) -> StoreResult<Vec<String>> {
        Ok(self.sets.get(key).map(|s| s.iter().cloned().collect()).unwrap_or_default())
    }

    async fn set_remove(&self, key: &str, member: &str) -> StoreResult<()> {
        if let Some(mut set) = self.sets.get_mut(key) {
            set.remove(member);
        }
        self.sets.remove_if(key, |_, set| set.is_empty());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
