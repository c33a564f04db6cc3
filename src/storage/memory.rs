// src/storage/memory.rs

//! In-memory storage doubles for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::storage::ObjectStore;

/// Keeps objects in a shared map; clones see the same contents.
#[derive(Clone, Default)]
pub struct MemoryStore {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently stored, sorted for stable assertions.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.objects.lock().unwrap().get(key).cloned())
    }
}

/// Fails every operation, for exercising fallback paths.
pub struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn put(&self, key: &str, _bytes: &[u8]) -> Result<()> {
        Err(AppError::storage(key, "simulated remote failure"))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Err(AppError::storage(key, "simulated remote failure"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = MemoryStore::new();
        store.put("a/b.json", b"[]").await.unwrap();
        assert_eq!(store.get("a/b.json").await.unwrap(), Some(b"[]".to_vec()));
        assert_eq!(store.get("missing").await.unwrap(), None);
        assert_eq!(store.keys(), vec!["a/b.json"]);
    }
}
