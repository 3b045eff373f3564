use crate::core::client::storage::{
    collect_stream, ByteStream, ObjectBody, ObjectStat, ObjectStoreClient, ObjectStoreError,
};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Size of the chunks served by [`InMemoryObjectStore::get_object`].
pub const READ_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    content_type: String,
}

/// Process-local [`ObjectStoreClient`] for tests and offline runs.
///
/// Reads are served in [`READ_CHUNK_SIZE`] slices so callers see the same
/// multi-chunk streams a network store produces.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    buckets: RwLock<HashMap<String, HashMap<String, StoredObject>>>,
    bucket_creations: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times a bucket was actually created.
    pub fn bucket_creations(&self) -> usize {
        self.bucket_creations.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail with a transport error until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Sorted keys currently stored in `bucket`.
    pub async fn object_keys(&self, bucket: &str) -> Vec<String> {
        let buckets = self.buckets.read().await;
        let mut keys: Vec<String> =
            buckets.get(bucket).map(|objects| objects.keys().cloned().collect()).unwrap_or_default();
        keys.sort();
        keys
    }

    fn check_available(&self) -> Result<(), ObjectStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ObjectStoreError::Transport("object store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStoreClient for InMemoryObjectStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, ObjectStoreError> {
        self.check_available()?;
        Ok(self.buckets.read().await.contains_key(bucket))
    }

    async fn make_bucket(&self, bucket: &str) -> Result<(), ObjectStoreError> {
        self.check_available()?;
        let mut buckets = self.buckets.write().await;
        if !buckets.contains_key(bucket) {
            buckets.insert(bucket.to_string(), HashMap::new());
            self.bucket_creations.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ByteStream,
        size: u64,
        content_type: &str,
    ) -> Result<(), ObjectStoreError> {
        self.check_available()?;
        // Drain before taking the lock so a slow producer never blocks readers.
        let data = collect_stream(body).await.map_err(|e| ObjectStoreError::Stream(e.to_string()))?;
        let actual = data.len() as u64;
        if actual != size {
            return Err(ObjectStoreError::SizeMismatch { declared: size, actual });
        }

        let mut buckets = self.buckets.write().await;
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| ObjectStoreError::Transport(format!("bucket {bucket} does not exist")))?;
        objects.insert(key.to_string(), StoredObject { data, content_type: content_type.to_string() });
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectBody, ObjectStoreError> {
        self.check_available()?;
        let object = self
            .buckets
            .read()
            .await
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned()
            .ok_or_else(|| ObjectStoreError::not_found(bucket, key))?;

        let stat = ObjectStat { size: object.data.len() as u64, content_type: Some(object.content_type) };
        let data = object.data;
        let chunks: Vec<std::io::Result<Bytes>> = (0..data.len())
            .step_by(READ_CHUNK_SIZE)
            .map(|start| Ok(data.slice(start..(start + READ_CHUNK_SIZE).min(data.len()))))
            .collect();

        Ok(ObjectBody { stat, stream: Box::pin(futures::stream::iter(chunks)) })
    }

    async fn stat_object(&self, bucket: &str, key: &str) -> Result<ObjectStat, ObjectStoreError> {
        self.check_available()?;
        self.buckets
            .read()
            .await
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .map(|object| ObjectStat { size: object.data.len() as u64, content_type: Some(object.content_type.clone()) })
            .ok_or_else(|| ObjectStoreError::not_found(bucket, key))
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<(), ObjectStoreError> {
        self.check_available()?;
        if let Some(objects) = self.buckets.write().await.get_mut(bucket) {
            objects.remove(key);
        }
        Ok(())
    }
}
