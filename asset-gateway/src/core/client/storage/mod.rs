pub mod error;
pub mod memory;
pub mod s3;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use std::io;
use std::pin::Pin;

pub use error::ObjectStoreError;
pub use memory::InMemoryObjectStore;
pub use s3::AwsS3Client;

/// Streaming body handed to the store on writes and returned by it on reads.
pub type ByteStream = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send>>;

/// Object metadata returned by a stat call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectStat {
    /// Object size in bytes
    pub size: u64,

    /// Content type recorded when the object was written
    pub content_type: Option<String>,
}

/// A readable object. The stream must be drained or dropped by the caller.
pub struct ObjectBody {
    pub stat: ObjectStat,
    pub stream: ByteStream,
}

impl std::fmt::Debug for ObjectBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectBody").field("stat", &self.stat).finish_non_exhaustive()
    }
}

/// Capability set of an S3-compatible object store, addressed by (bucket, key).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    /// Check if a bucket exists
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, ObjectStoreError>;

    /// Create a bucket. Creating a bucket this caller already owns succeeds.
    async fn make_bucket(&self, bucket: &str) -> Result<(), ObjectStoreError>;

    /// Stream exactly `size` bytes from `body` into `bucket/key`, replacing any existing object.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ByteStream,
        size: u64,
        content_type: &str,
    ) -> Result<(), ObjectStoreError>;

    /// Open a readable stream for `bucket/key`
    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectBody, ObjectStoreError>;

    /// Fetch object metadata without reading the body
    async fn stat_object(&self, bucket: &str, key: &str) -> Result<ObjectStat, ObjectStoreError>;

    /// Remove `bucket/key`. Removing a missing object succeeds.
    async fn remove_object(&self, bucket: &str, key: &str) -> Result<(), ObjectStoreError>;
}

/// Wraps an in-memory buffer as a single-chunk [`ByteStream`].
pub fn byte_stream_from(data: impl Into<Bytes>) -> ByteStream {
    let data = data.into();
    Box::pin(futures::stream::iter(std::iter::once(Ok(data))))
}

/// Drains a [`ByteStream`] into one contiguous buffer.
pub async fn collect_stream(mut stream: ByteStream) -> io::Result<Bytes> {
    let mut buffer = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);
    }
    Ok(buffer.freeze())
}
