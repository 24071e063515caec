//! Failure-injecting backend for tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{KeyValueBackend, MemoryBackend, StoreError, StoreResult};

/// Which calls a [`FaultyBackend`] refuses.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Every call errors.
    Everything,
    /// Every call sleeps far past any sane deadline.
    Hang,
    /// Value writes for keys ending in one of these country codes error.
    ValueWrites(Vec<String>),
    /// Index additions error; value writes succeed.
    IndexWrites,
}

/// [`MemoryBackend`] wrapper that fails selected calls and counts every call.
pub struct FaultyBackend {
    inner: MemoryBackend,
    fail_on: FailOn,
    calls: AtomicUsize,
}

impl FaultyBackend {
    pub fn new(fail_on: FailOn) -> Self {
        Self { inner: MemoryBackend::new(), fail_on, calls: AtomicUsize::new(0) }
    }

    /// Number of backend calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn gate(&self, op: &str) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_on {
            FailOn::Everything => Err(StoreError::Backend(format!("injected failure on {op}"))),
            FailOn::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl KeyValueBackend for FaultyBackend {
    async fn get_value(&self, key: &str) -> StoreResult<Option<String>> {
        self.gate("get_value").await?;
        self.inner.get_value(key).await
    }

    async fn set_value(&self, key: &str, value: String) -> StoreResult<()> {
        self.gate("set_value").await?;
        if let FailOn::ValueWrites(countries) = &self.fail_on {
            if countries.iter().any(|c| key.ends_with(&format!(":{c}"))) {
                return Err(StoreError::Backend(format!("injected write failure for {key}")));
            }
        }
        self.inner.set_value(key, value).await
    }

    async fn delete_value(&self, key: &str) -> StoreResult<bool> {
        self.gate("delete_value").await?;
        self.inner.delete_value(key).await
    }

    async fn set_add(&self, key: &str, member: &str) -> StoreResult<()> {
        self.gate("set_add").await?;
        if matches!(self.fail_on, FailOn::IndexWrites) {
            return Err(StoreError::Backend(format!("injected index failure for {member}")));
        }
        self.inner.set_add(key, member).await
    }

    async fn set_members(&self, key: &str) -> StoreResult<Vec<String>> {
        self.gate("set_members").await?;
        self.inner.set_members(key).await
    }

    async fn set_remove(&self, key: &str, member: &str) -> StoreResult<()> {
        self.gate("set_remove").await?;
        self.inner.set_remove(key, member).await
    }

    fn name(&self) -> &'static str {
        "faulty"
    }
}
