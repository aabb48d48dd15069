//! Object store seam. Handlers and the transfer wrapper only see `ObjectStore`;
//! production wires in `S3Store`, tests use `MemoryStore`.

pub mod memory;
pub mod s3;

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use memory::MemoryStore;
pub use s3::S3Store;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object s3://{bucket}/{key} not found")]
    NotFound { bucket: String, key: String },

    #[error("access denied: {0}")]
    Access(String),

    #[error("storage I/O failed: {0}")]
    Io(String),
}

/// A single object write.
#[derive(Debug, Clone)]
pub struct PutObject {
    pub bucket: String,
    pub key: String,
    pub body: Bytes,
    pub content_type: String,
    /// User metadata; written as `x-amz-meta-*` headers on S3.
    pub metadata: BTreeMap<String, String>,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Reads the full body of `bucket/key`.
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError>;

    /// Writes an object, replacing any existing object under the same key.
    async fn put(&self, object: PutObject) -> Result<(), StoreError>;
}
