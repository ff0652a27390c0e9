//! In-process cart storage.

use crate::domain::repositories::{CartStorage, CartStorageResult};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Cart storage held in a process-local map.
///
/// Used when `REDIS_URL` is unset or Redis is unreachable at startup, and
/// by the HTTP tests. Entries never expire and are lost on restart.
pub struct MemoryCartStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCartStorage {
    pub fn new() -> Self {
        debug!("Using MemoryCartStorage (carts are not shared between instances)");
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored carts.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for MemoryCartStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CartStorage for MemoryCartStorage {
    async fn get(&self, key: &str) -> CartStorageResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, blob: &str) -> CartStorageResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> CartStorageResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
