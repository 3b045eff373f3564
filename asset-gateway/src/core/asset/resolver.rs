use crate::core::asset::naming::{object_key, ImageExtension, ItemId};
use crate::core::asset::store::{AssetStore, Presence};
use crate::core::asset::{AssetError, AssetResult};
use crate::core::client::storage::{collect_stream, ByteStream};
use crate::core::config::{AssetStoreConfig, VariantPolicy};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Image resolved for an item. `body` streams the object; drain it with
/// [`FetchedAsset::into_bytes`] or forward it chunk by chunk.
pub struct FetchedAsset {
    pub key: String,
    pub extension: ImageExtension,
    pub size: u64,
    pub body: ByteStream,
}

impl FetchedAsset {
    /// Content type implied by the extension the image was found under.
    pub fn content_type(&self) -> &'static str {
        self.extension.content_type()
    }

    /// Reads the whole image into memory.
    pub async fn into_bytes(self) -> AssetResult<Bytes> {
        let key = self.key;
        collect_stream(self.body).await.map_err(|err| AssetError::ReadFailed { key, reason: err.to_string() })
    }
}

impl std::fmt::Debug for FetchedAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchedAsset")
            .field("key", &self.key)
            .field("extension", &self.extension)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Addresses item images by item id.
///
/// Keys follow `item-<id><extension>`. Lookups by id walk the configured
/// probe order and the first existing key wins, so an item that has images
/// under several extensions is served the one probed first.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    store: AssetStore,
    probe_order: Arc<[ImageExtension]>,
    variant_policy: VariantPolicy,
}

impl AssetResolver {
    pub fn new(store: AssetStore, config: &AssetStoreConfig) -> Self {
        Self { store, probe_order: Arc::from(config.probe_order()), variant_policy: config.variant_policy() }
    }

    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    pub fn probe_order(&self) -> &[ImageExtension] {
        &self.probe_order
    }

    fn candidates(&self, item_id: ItemId) -> impl Iterator<Item = (ImageExtension, String)> + '_ {
        self.probe_order.iter().map(move |extension| (*extension, object_key(item_id, *extension)))
    }

    /// Stores an image for `item_id` and returns the key it was written under.
    ///
    /// # Arguments
    /// * `filename` - Original file name; only its extension is used, and it
    ///   must be one of the probed extensions.
    /// * `body` - Image bytes, exactly `size` of them.
    /// * `declared_content_type` - Content type sent by the client. When absent
    ///   the type implied by the extension is recorded.
    #[instrument(skip(self, body))]
    pub async fn upload(
        &self,
        item_id: ItemId,
        filename: Option<&str>,
        body: ByteStream,
        size: u64,
        declared_content_type: Option<&str>,
    ) -> AssetResult<String> {
        let extension = ImageExtension::from_filename(filename)?;
        // Keys outside the probe order could never be fetched or deleted by id
        if !self.probe_order.contains(&extension) {
            return Err(AssetError::UnsupportedExtension(extension.to_string()));
        }
        let key = object_key(item_id, extension);
        let content_type = declared_content_type.filter(|ct| !ct.trim().is_empty()).unwrap_or(extension.content_type());

        if self.variant_policy == VariantPolicy::Replace {
            for (_, stale_key) in self.candidates(item_id).filter(|(other, _)| *other != extension) {
                if let Presence::Present { .. } = self.store.probe(&stale_key).await? {
                    self.store.delete(&stale_key).await?;
                    info!(item_id, key = %stale_key, "Removed image variant replaced by upload");
                }
            }
        }

        self.store.put(&key, body, size, content_type).await?;
        info!(item_id, key = %key, size, "Image uploaded");
        Ok(key)
    }

    /// Opens the first image found for `item_id` in probe order.
    #[instrument(skip(self))]
    pub async fn fetch(&self, item_id: ItemId) -> AssetResult<FetchedAsset> {
        let (extension, key, _) = self.locate(item_id).await?.ok_or_else(|| item_not_found(item_id))?;
        let object = self.store.get(&key).await?;
        debug!(key = %key, size = object.stat.size, "Serving image");
        Ok(FetchedAsset { key, extension, size: object.stat.size, body: object.stream })
    }

    /// Deletes every stored variant of the item's image.
    ///
    /// # Returns
    /// * The deleted keys, in probe order. Never empty.
    /// * `NotFound` if no variant existed.
    #[instrument(skip(self))]
    pub async fn delete(&self, item_id: ItemId) -> AssetResult<Vec<String>> {
        let mut deleted = Vec::new();
        for (_, key) in self.candidates(item_id) {
            if let Presence::Present { .. } = self.store.probe(&key).await? {
                self.store.delete(&key).await?;
                deleted.push(key);
            }
        }

        if deleted.is_empty() {
            return Err(item_not_found(item_id));
        }
        info!(keys = ?deleted, "Image deleted");
        Ok(deleted)
    }

    /// Advisory: store failures read as "no image".
    pub async fn exists(&self, item_id: ItemId) -> bool {
        for (_, key) in self.candidates(item_id) {
            if self.store.exists(&key).await {
                return true;
            }
        }
        false
    }

    /// Size in bytes of the image [`AssetResolver::fetch`] would serve.
    pub async fn size(&self, item_id: ItemId) -> AssetResult<u64> {
        self.locate(item_id).await?.map(|(_, _, size)| size).ok_or_else(|| item_not_found(item_id))
    }

    async fn locate(&self, item_id: ItemId) -> AssetResult<Option<(ImageExtension, String, u64)>> {
        for (extension, key) in self.candidates(item_id) {
            if let Presence::Present { size } = self.store.probe(&key).await? {
                return Ok(Some((extension, key, size)));
            }
        }
        Ok(None)
    }
}

fn item_not_found(item_id: ItemId) -> AssetError {
    AssetError::NotFound(format!("item {item_id}"))
}
