// src/storage/mod.rs

//! Storage abstractions for pipeline artifacts.
//!
//! Every artifact is addressed by the relative path configured in
//! `output_files`; the same string is a filesystem path under the run root
//! and an object key in the bucket. Writes always land locally and are
//! mirrored byte-for-byte to the bucket when one is configured. Reads
//! prefer the bucket and fall back to the local copy.

pub mod gcs;
pub mod local;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{OutputFiles, RecordKind};

// Re-export for convenience
pub use gcs::GcsStore;
pub use local::LocalStore;

/// A flat keyed byte store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write the full object at `key`, replacing any previous content.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Read the full object at `key`, or `None` if it does not exist.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
}

/// Two-tier artifact store used by every pipeline stage.
pub struct DataStore {
    local: LocalStore,
    remote: Option<Box<dyn ObjectStore>>,
    files: OutputFiles,
}

impl DataStore {
    /// Create a store over a local root and an optional remote mirror.
    pub fn new(local: LocalStore, remote: Option<Box<dyn ObjectStore>>, files: OutputFiles) -> Self {
        Self {
            local,
            remote,
            files,
        }
    }

    /// The configured artifact paths.
    pub fn files(&self) -> &OutputFiles {
        &self.files
    }

    /// Serialize raw records as a pretty-printed JSON array and write the
    /// same bytes to both tiers.
    pub async fn write_raw<T: Serialize>(&self, kind: RecordKind, records: &[T]) -> Result<()> {
        let key = self.files.raw.get(kind).to_string();
        let bytes = serde_json::to_vec_pretty(records)?;
        log::info!("Writing {} raw {} records to {}", records.len(), kind, key);
        self.put_both(&key, &bytes).await
    }

    /// Read a raw document back as loosely typed values, one per record,
    /// so a single malformed record can be rejected on its own later.
    pub async fn read_raw(&self, kind: RecordKind) -> Result<Vec<serde_json::Value>> {
        let key = self.files.raw.get(kind);
        let bytes = self.fetch(key).await?.ok_or_else(|| {
            AppError::storage(key, "raw document not found locally or in the bucket")
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Write an encoded clean table under the path configured for `kind`.
    pub async fn write_clean(&self, kind: RecordKind, bytes: &[u8]) -> Result<()> {
        let key = self.files.clean.get(kind).to_string();
        self.write_table(&key, bytes).await
    }

    /// Read the encoded clean table for `kind`, bucket first.
    pub async fn read_clean(&self, kind: RecordKind) -> Result<Vec<u8>> {
        self.read_table(self.files.clean.get(kind)).await
    }

    /// Write an encoded table to both tiers.
    pub async fn write_table(&self, key: &str, bytes: &[u8]) -> Result<()> {
        log::info!("Writing table ({} bytes) to {}", bytes.len(), key);
        self.put_both(key, bytes).await
    }

    /// Read an encoded table, bucket first.
    pub async fn read_table(&self, key: &str) -> Result<Vec<u8>> {
        self.fetch(key)
            .await?
            .ok_or_else(|| AppError::storage(key, "table not found locally or in the bucket"))
    }

    async fn put_both(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.local.put(key, bytes).await?;
        match &self.remote {
            Some(remote) => remote.put(key, bytes).await?,
            None => log::warn!("No bucket configured; {} stays local only", key),
        }
        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if let Some(remote) = &self.remote {
            match remote.get(key).await {
                Ok(Some(bytes)) => return Ok(Some(bytes)),
                Ok(None) => log::warn!("{} not in bucket; trying the local copy", key),
                Err(e) => log::warn!("Remote read of {} failed: {}; trying the local copy", key, e),
            }
        }
        self.local.get(key).await
    }
}
