// src/storage/gcs.rs

//! Google Cloud Storage backend, reached through the bucket's
//! S3-compatible XML API. Credentials come from the standard AWS
//! environment variables carrying the bucket's HMAC key pair.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::{AppError, Result};
use crate::models::GcsConfig;
use crate::storage::ObjectStore;

/// Bucket-backed storage for pipeline artifacts.
pub struct GcsStore {
    client: Client,
    bucket: String,
}

impl GcsStore {
    /// Connect to the configured bucket, or `None` when no bucket is set.
    pub async fn connect(config: &GcsConfig) -> Result<Option<Self>> {
        let Some(bucket) = config.bucket.as_deref().filter(|b| !b.trim().is_empty()) else {
            log::warn!("No GCS bucket configured; remote storage disabled");
            return Ok(None);
        };

        let base = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let s3_config = aws_sdk_s3::config::Builder::from(&base)
            .endpoint_url(config.endpoint.clone())
            .force_path_style(true)
            .build();

        log::info!("Using bucket gs://{} via {}", bucket, config.endpoint);
        Ok(Some(Self {
            client: Client::from_conf(s3_config),
            bucket: bucket.to_string(),
        }))
    }

    fn location(&self, key: &str) -> String {
        format!("gs://{}/{}", self.bucket, key)
    }
}

#[async_trait]
impl ObjectStore for GcsStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes.to_vec()))
            .content_type(content_type_for(key))
            .send()
            .await
            .map_err(|e| AppError::storage(self.location(key), e))?;

        log::info!("Uploaded {} bytes to {}", bytes.len(), self.location(key));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match result {
            Ok(output) => {
                let bytes = output
                    .body
                    .collect()
                    .await
                    .map_err(|e| AppError::storage(self.location(key), e))?;
                Ok(Some(bytes.into_bytes().to_vec()))
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    Ok(None)
                } else {
                    Err(AppError::storage(self.location(key), service_err))
                }
            }
        }
    }
}

fn content_type_for(key: &str) -> &'static str {
    if key.ends_with(".json") {
        "application/json"
    } else {
        "application/octet-stream"
    }
}
