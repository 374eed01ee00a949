//! In-memory key-value slot for development mode and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{KvStore, StorageError};

/// Process-local slot; contents are lost when the process exits.
///
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKvStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_last_put() {
        let store = MemoryKvStore::new();
        assert_eq!(store.get("shoebox:cart").await.ok().flatten(), None);

        store.put("shoebox:cart", "[]").await.ok();
        assert_eq!(
            store.get("shoebox:cart").await.ok().flatten().as_deref(),
            Some("[]")
        );

        store.put("shoebox:cart", "[1]").await.ok();
        assert_eq!(
            store.get("shoebox:cart").await.ok().flatten().as_deref(),
            Some("[1]")
        );
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryKvStore::new();
        let clone = store.clone();

        store.put("key", "value").await.ok();
        assert_eq!(
            clone.get("key").await.ok().flatten().as_deref(),
            Some("value")
        );
    }
}
