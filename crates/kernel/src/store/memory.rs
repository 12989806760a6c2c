//! In-memory storage backend.
//!
//! Test double for the blob seam. `set_fail_writes` simulates a backend
//! outage so the cache-not-advanced contract can be exercised.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::StorageBackend;

/// Holds the serialized tenant map in process memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: Mutex<Option<Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `store` call fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn load(&self) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.data.lock().await.clone())
    }

    async fn store(&self, data: &[u8]) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("simulated backend write failure");
        }
        *self.data.lock().await = Some(data.to_vec());
        Ok(())
    }
}
