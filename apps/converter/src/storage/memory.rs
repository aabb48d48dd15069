use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::storage::{ObjectStore, PutObject, StoreError};

/// In-process object store keyed by `(bucket, key)`.
///
/// Buckets listed in `denied` reject every call with `StoreError::Access`.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<(String, String), PutObject>>,
    denied: Vec<String>,
    puts: Mutex<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call against `bucket` fail with an access error.
    pub fn deny_bucket(mut self, bucket: &str) -> Self {
        self.denied.push(bucket.to_string());
        self
    }

    /// Seeds a plain-text object.
    pub fn insert(&self, bucket: &str, key: &str, body: impl Into<Bytes>) {
        let object = PutObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body: body.into(),
            content_type: "text/plain".to_string(),
            metadata: Default::default(),
        };
        self.lock_objects()
            .insert((bucket.to_string(), key.to_string()), object);
    }

    /// Returns a copy of the stored object, if any.
    pub fn object(&self, bucket: &str, key: &str) -> Option<PutObject> {
        self.lock_objects()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Number of successful `put` calls.
    pub fn put_count(&self) -> u32 {
        *self.puts.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_objects(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), PutObject>> {
        self.objects.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_access(&self, bucket: &str) -> Result<(), StoreError> {
        if self.denied.iter().any(|b| b == bucket) {
            return Err(StoreError::Access(format!("bucket {bucket} is not accessible")));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        self.check_access(bucket)?;
        self.object(bucket, key)
            .map(|object| object.body)
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn put(&self, object: PutObject) -> Result<(), StoreError> {
        self.check_access(&object.bucket)?;
        self.lock_objects()
            .insert((object.bucket.clone(), object.key.clone()), object);
        *self.puts.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_object_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get("bucket", "missing.txt").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_put_then_get_returns_body() {
        let store = MemoryStore::new();
        store
            .put(PutObject {
                bucket: "b".into(),
                key: "k".into(),
                body: Bytes::from_static(b"payload"),
                content_type: "application/octet-stream".into(),
                metadata: Default::default(),
            })
            .await
            .unwrap();
        assert_eq!(store.get("b", "k").await.unwrap(), Bytes::from_static(b"payload"));
        assert_eq!(store.put_count(), 1);
    }

    #[tokio::test]
    async fn test_denied_bucket_rejects_calls() {
        let store = MemoryStore::new().deny_bucket("locked");
        store.insert("locked", "k", "x");
        let err = store.get("locked", "k").await.unwrap_err();
        assert!(matches!(err, StoreError::Access(_)));
    }
}
