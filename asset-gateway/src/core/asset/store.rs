use crate::core::asset::{AssetError, AssetResult};
use crate::core::client::storage::{ByteStream, ObjectBody, ObjectStat, ObjectStoreClient, ObjectStoreError};
use crate::core::config::AssetStoreConfig;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of [`AssetStore::ensure_bucket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketProvisioning {
    Created,
    AlreadyExists,
}

/// Result of an authoritative existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present { size: u64 },
    Absent,
}

/// All object operations for the single configured bucket.
///
/// Holds no mutable state: the bucket name and client are fixed at
/// construction, so clones can be used from any number of tasks at once.
/// Nothing is retried here; retry policy belongs to the caller.
#[derive(Clone)]
pub struct AssetStore {
    client: Arc<dyn ObjectStoreClient>,
    bucket: Arc<str>,
}

impl std::fmt::Debug for AssetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetStore").field("bucket", &self.bucket).finish_non_exhaustive()
    }
}

impl AssetStore {
    pub fn new(client: Arc<dyn ObjectStoreClient>, config: &AssetStoreConfig) -> Self {
        Self { client, bucket: Arc::from(config.bucket_name()) }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Creates the bucket if it does not exist yet.
    ///
    /// Meant to run once before any traffic is served; a failure here must
    /// abort startup.
    ///
    /// # Returns
    /// * `BucketProvisioning::Created` if this call created the bucket.
    /// * `BucketProvisioning::AlreadyExists` otherwise.
    pub async fn ensure_bucket(&self) -> AssetResult<BucketProvisioning> {
        let bucket = self.bucket();
        let unavailable = |err: ObjectStoreError| AssetError::StoreUnavailable {
            bucket: bucket.to_string(),
            reason: err.to_string(),
        };

        if self.client.bucket_exists(bucket).await.map_err(unavailable)? {
            info!(bucket, "Bucket already exists, skipping creation");
            return Ok(BucketProvisioning::AlreadyExists);
        }

        info!(bucket, "Creating new bucket");
        self.client.make_bucket(bucket).await.map_err(unavailable)?;
        info!(bucket, "Bucket created successfully");
        Ok(BucketProvisioning::Created)
    }

    /// Streams `size` bytes from `body` into `key`, overwriting any existing object.
    ///
    /// On `WriteFailed` the object at `key` is undefined; writing the same
    /// bytes again is safe.
    pub async fn put(&self, key: &str, body: ByteStream, size: u64, content_type: &str) -> AssetResult<()> {
        debug!(log_type = "AssetStore", category = "put", key, size, content_type, "Writing object");
        self.client.put_object(self.bucket(), key, body, size, content_type).await.map_err(|err| {
            AssetError::WriteFailed { key: key.to_string(), reason: err.to_string() }
        })?;
        info!(bucket = self.bucket(), key, size, "Stored object");
        Ok(())
    }

    /// Opens a streaming read of `key`. The returned stream is never buffered here.
    pub async fn get(&self, key: &str) -> AssetResult<ObjectBody> {
        debug!(log_type = "AssetStore", category = "get", key, "Reading object");
        self.client.get_object(self.bucket(), key).await.map_err(|err| read_error(key, err))
    }

    pub async fn stat(&self, key: &str) -> AssetResult<ObjectStat> {
        self.client.stat_object(self.bucket(), key).await.map_err(|err| read_error(key, err))
    }

    /// Existence check that keeps "absent" apart from "could not tell".
    ///
    /// Store failures surface as `ReadFailed` instead of `Absent`.
    pub async fn probe(&self, key: &str) -> AssetResult<Presence> {
        match self.stat(key).await {
            Ok(stat) => Ok(Presence::Present { size: stat.size }),
            Err(AssetError::NotFound(_)) => Ok(Presence::Absent),
            Err(err) => Err(err),
        }
    }

    /// Advisory existence check: any failure reads as `false`.
    ///
    /// Use [`AssetStore::probe`] where a store outage must not look like a
    /// missing object.
    pub async fn exists(&self, key: &str) -> bool {
        match self.probe(key).await {
            Ok(presence) => matches!(presence, Presence::Present { .. }),
            Err(err) => {
                warn!(bucket = self.bucket(), key, error = %err, "Existence check failed, reporting object as absent");
                false
            }
        }
    }

    /// Removes `key`. Deleting a missing object succeeds.
    pub async fn delete(&self, key: &str) -> AssetResult<()> {
        match self.client.remove_object(self.bucket(), key).await {
            Ok(()) => {
                info!(bucket = self.bucket(), key, "Deleted object");
                Ok(())
            }
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(AssetError::WriteFailed { key: key.to_string(), reason: err.to_string() }),
        }
    }
}

fn read_error(key: &str, err: ObjectStoreError) -> AssetError {
    if err.is_not_found() {
        AssetError::NotFound(key.to_string())
    } else {
        AssetError::ReadFailed { key: key.to_string(), reason: err.to_string() }
    }
}
