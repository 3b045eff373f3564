use crate::core::asset::AssetResolver;
use crate::core::client::storage::ByteStream;
use crate::core::client::InMemoryObjectStore;
use crate::core::config::AssetStoreConfig;
use crate::setup::provision;
use bytes::Bytes;
use rstest::*;
use std::sync::Arc;

pub const TEST_BUCKET: &str = "test-item-images";

#[fixture]
pub fn object_store() -> Arc<InMemoryObjectStore> {
    Arc::new(InMemoryObjectStore::new())
}

#[fixture]
pub fn store_config() -> AssetStoreConfig {
    AssetStoreConfig::new(TEST_BUCKET).expect("test bucket name is valid")
}

/// Resolver over `object_store` with the bucket already provisioned.
pub async fn provisioned_resolver(object_store: Arc<InMemoryObjectStore>, config: &AssetStoreConfig) -> AssetResolver {
    provision(object_store, config).await.expect("bucket provisioning succeeds")
}

/// Deterministic non-repeating-looking payload of `len` bytes.
pub fn payload(len: usize) -> Bytes {
    (0..len).map(|i| (i % 251) as u8).collect::<Vec<u8>>().into()
}

/// Splits `data` into a stream of `chunk_size` pieces.
pub fn chunked_stream(data: Bytes, chunk_size: usize) -> ByteStream {
    let chunks: Vec<std::io::Result<Bytes>> = (0..data.len())
        .step_by(chunk_size)
        .map(|start| Ok(data.slice(start..(start + chunk_size).min(data.len()))))
        .collect();
    Box::pin(futures::stream::iter(chunks))
}
