//! Upload: write the serialised elements to object storage.
//!
//! [`ObjectSink`] is the seam the pipeline writes through. The production
//! sink, [`ObjectStoreSink`], wraps any [`object_store::ObjectStore`]: S3 in
//! the binary, [`object_store::memory::InMemory`] in tests. Writes use
//! overwrite mode, so uploading the same name twice replaces the object
//! under the same key.

use crate::config::StorageConfig;
use crate::error::PipelineError;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutMode, PutOptions, PutPayload};
use std::sync::Arc;
use tracing::{debug, info};

/// Content type of every uploaded object.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Key prefix under which element files are written.
pub const OUTPUT_PREFIX: &str = "outputs";

/// Where one element file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub bucket: String,
    pub key: String,
    pub content_type: &'static str,
    public_url: String,
}

impl UploadTarget {
    /// Derive the target for `file_name`: `outputs/{file_name}-embeddings.json`.
    pub fn for_file(storage: &StorageConfig, file_name: &str) -> Self {
        let key = format!("{OUTPUT_PREFIX}/{file_name}-embeddings.json");
        Self {
            bucket: storage.bucket.clone(),
            public_url: storage.public_url(&key),
            key,
            content_type: JSON_CONTENT_TYPE,
        }
    }

    /// URL the object is reachable at once uploaded.
    pub fn public_url(&self) -> &str {
        &self.public_url
    }
}

/// Somewhere serialised elements can be written.
#[async_trait]
pub trait ObjectSink: Send + Sync {
    /// Write `body` to `target`, replacing whatever is there.
    async fn put(&self, target: &UploadTarget, body: Bytes) -> Result<(), PipelineError>;
}

/// [`ObjectSink`] backed by an [`ObjectStore`] bound to a single bucket.
#[derive(Debug, Clone)]
pub struct ObjectStoreSink(Arc<dyn ObjectStore>);

impl ObjectStoreSink {
    /// Wrap a concrete store.
    pub fn new(store: impl ObjectStore) -> Self {
        Self(Arc::new(store))
    }

    /// Build an S3 client for `storage.bucket` with static credentials.
    ///
    /// When no credentials are configured, the AWS default chain (instance
    /// metadata, web identity) is used instead.
    pub fn connect(storage: &StorageConfig) -> Result<Self, PipelineError> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&storage.bucket)
            .with_region(&storage.region);

        if let Some(endpoint) = &storage.endpoint {
            builder = builder.with_endpoint(endpoint);
            if endpoint.starts_with("http://") {
                builder = builder.with_allow_http(true);
            }
        }

        if let Some(access_key) = &storage.access_key_id {
            builder = builder.with_access_key_id(access_key);
        }

        if let Some(secret_key) = &storage.secret_access_key {
            builder = builder.with_secret_access_key(secret_key);
        }

        let store = builder
            .build()
            .map_err(|e| PipelineError::InvalidConfig(format!("S3 client: {e}")))?;

        debug!(bucket = %storage.bucket, region = %storage.region, "S3 client initialised");
        Ok(Self::new(store))
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.0
    }
}

#[async_trait]
impl ObjectSink for ObjectStoreSink {
    async fn put(&self, target: &UploadTarget, body: Bytes) -> Result<(), PipelineError> {
        let size = body.len();
        info!(bucket = %target.bucket, key = %target.key, size, "Uploading elements");

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, target.content_type.into());
        let opts = PutOptions {
            mode: PutMode::Overwrite,
            attributes,
            ..Default::default()
        };

        // `Path::from` would percent-encode characters such as `#` or `%`
        // and store the object under a different key than the one reported.
        let location = Path::parse(&target.key).map_err(PipelineError::upload)?;

        let result = self
            .0
            .put_opts(&location, PutPayload::from(body), opts)
            .await
            .map_err(PipelineError::upload)?;

        debug!(e_tag = ?result.e_tag, "Upload complete");
        Ok(())
    }
}
