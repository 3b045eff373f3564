use crate::core::asset::{AssetError, ImageExtension};
use crate::core::client::storage::byte_stream_from;
use crate::core::client::InMemoryObjectStore;
use crate::core::config::{AssetStoreConfig, VariantPolicy};
use crate::tests::common::{chunked_stream, object_store, payload, provisioned_resolver, store_config, TEST_BUCKET};
use assert_matches::assert_matches;
use bytes::Bytes;
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test]
async fn upload_then_fetch_round_trips(object_store: Arc<InMemoryObjectStore>, store_config: AssetStoreConfig) {
    let resolver = provisioned_resolver(object_store, &store_config).await;
    let data = payload(4096);

    let key = resolver
        .upload(42, Some("photo.PNG"), chunked_stream(data.clone(), 1000), data.len() as u64, Some("image/png"))
        .await
        .unwrap();
    assert_eq!(key, "item-42.png");

    let fetched = resolver.fetch(42).await.unwrap();
    assert_eq!(fetched.key, "item-42.png");
    assert_eq!(fetched.extension, ImageExtension::Png);
    assert_eq!(fetched.content_type(), "image/png");
    assert_eq!(fetched.size, 4096);
    assert_eq!(fetched.into_bytes().await.unwrap(), data);
}

#[rstest]
#[tokio::test]
async fn upload_without_filename_defaults_to_jpg(
    object_store: Arc<InMemoryObjectStore>,
    store_config: AssetStoreConfig,
) {
    let resolver = provisioned_resolver(object_store.clone(), &store_config).await;

    let key = resolver.upload(3, None, byte_stream_from("abc"), 3, None).await.unwrap();

    assert_eq!(key, "item-3.jpg");
    assert_eq!(object_store.object_keys(TEST_BUCKET).await, vec!["item-3.jpg".to_string()]);
}

#[rstest]
#[tokio::test]
async fn unsupported_extension_stores_nothing(
    object_store: Arc<InMemoryObjectStore>,
    store_config: AssetStoreConfig,
) {
    let resolver = provisioned_resolver(object_store.clone(), &store_config).await;

    let result = resolver.upload(5, Some("report.pdf"), byte_stream_from("%PDF"), 4, None).await;

    assert_matches!(result, Err(AssetError::UnsupportedExtension(extension)) if extension == ".pdf");
    assert!(object_store.object_keys(TEST_BUCKET).await.is_empty());
}

#[rstest]
#[tokio::test]
async fn fetch_prefers_the_first_extension_in_probe_order(
    object_store: Arc<InMemoryObjectStore>,
    store_config: AssetStoreConfig,
) {
    let resolver = provisioned_resolver(object_store, &store_config).await;
    resolver.upload(7, Some("b.png"), byte_stream_from("png"), 3, None).await.unwrap();
    resolver.upload(7, Some("a.jpg"), byte_stream_from("jpeg"), 4, None).await.unwrap();

    let fetched = resolver.fetch(7).await.unwrap();

    assert_eq!(fetched.key, "item-7.jpg");
    assert_eq!(fetched.into_bytes().await.unwrap(), Bytes::from_static(b"jpeg"));
    assert_eq!(resolver.size(7).await.unwrap(), 4);
}

#[rstest]
#[tokio::test]
async fn custom_probe_order_changes_which_variant_is_served(object_store: Arc<InMemoryObjectStore>) {
    let config = AssetStoreConfig::new(TEST_BUCKET)
        .unwrap()
        .with_probe_order(vec![ImageExtension::Gif, ImageExtension::Jpg])
        .unwrap();
    let resolver = provisioned_resolver(object_store, &config).await;
    resolver.upload(8, Some("x.jpg"), byte_stream_from("jpg"), 3, None).await.unwrap();
    resolver.upload(8, Some("x.gif"), byte_stream_from("gif!"), 4, None).await.unwrap();

    let fetched = resolver.fetch(8).await.unwrap();

    assert_eq!(fetched.key, "item-8.gif");
    assert_eq!(fetched.content_type(), "image/gif");
    assert_eq!(resolver.size(8).await.unwrap(), 4);
}

#[rstest]
#[case::keep(VariantPolicy::Keep)]
#[case::replace(VariantPolicy::Replace)]
#[tokio::test]
async fn upload_rejects_extensions_outside_the_probe_order(
    object_store: Arc<InMemoryObjectStore>,
    #[case] policy: VariantPolicy,
) {
    let config = AssetStoreConfig::new(TEST_BUCKET)
        .unwrap()
        .with_probe_order(vec![ImageExtension::Gif, ImageExtension::Jpg])
        .unwrap()
        .with_variant_policy(policy);
    let resolver = provisioned_resolver(object_store.clone(), &config).await;
    resolver.upload(9, Some("x.jpg"), byte_stream_from("jpg"), 3, None).await.unwrap();

    let result = resolver.upload(9, Some("x.png"), byte_stream_from("png"), 3, None).await;

    assert_matches!(result, Err(AssetError::UnsupportedExtension(extension)) if extension == ".png");
    // Nothing unreachable was written and the existing variant is untouched
    assert_eq!(object_store.object_keys(TEST_BUCKET).await, vec!["item-9.jpg".to_string()]);
    assert_eq!(resolver.delete(9).await.unwrap(), vec!["item-9.jpg".to_string()]);
    assert!(object_store.object_keys(TEST_BUCKET).await.is_empty());
}

#[rstest]
#[tokio::test]
async fn missing_item_is_not_found(object_store: Arc<InMemoryObjectStore>, store_config: AssetStoreConfig) {
    let resolver = provisioned_resolver(object_store, &store_config).await;

    assert_matches!(resolver.fetch(99).await, Err(AssetError::NotFound(what)) if what == "item 99");
    assert_matches!(resolver.size(99).await, Err(AssetError::NotFound(_)));
    assert!(!resolver.exists(99).await);
}

#[rstest]
#[tokio::test]
async fn delete_removes_every_variant(object_store: Arc<InMemoryObjectStore>, store_config: AssetStoreConfig) {
    let resolver = provisioned_resolver(object_store.clone(), &store_config).await;
    resolver.upload(9, Some("a.png"), byte_stream_from("png"), 3, None).await.unwrap();
    resolver.upload(9, Some("a.jpg"), byte_stream_from("jpg"), 3, None).await.unwrap();
    resolver.upload(10, Some("a.gif"), byte_stream_from("gif"), 3, None).await.unwrap();

    let deleted = resolver.delete(9).await.unwrap();

    assert_eq!(deleted, vec!["item-9.jpg".to_string(), "item-9.png".to_string()]);
    assert!(!resolver.exists(9).await);
    assert_eq!(object_store.object_keys(TEST_BUCKET).await, vec!["item-10.gif".to_string()]);
    assert_matches!(resolver.delete(9).await, Err(AssetError::NotFound(_)));
}

#[rstest]
#[case::absent(None, "image/gif")]
#[case::empty(Some(""), "image/gif")]
#[case::blank(Some("  "), "image/gif")]
#[case::declared(Some("application/octet-stream"), "application/octet-stream")]
#[tokio::test]
async fn recorded_content_type_falls_back_to_the_extension(
    object_store: Arc<InMemoryObjectStore>,
    store_config: AssetStoreConfig,
    #[case] declared: Option<&str>,
    #[case] expected: &str,
) {
    let resolver = provisioned_resolver(object_store, &store_config).await;

    resolver.upload(11, Some("anim.gif"), byte_stream_from("gif"), 3, declared).await.unwrap();

    let object = resolver.store().get("item-11.gif").await.unwrap();
    assert_eq!(object.stat.content_type.as_deref(), Some(expected));
}

#[rstest]
#[case::keep(VariantPolicy::Keep, vec!["item-12.jpg", "item-12.png"], "item-12.jpg")]
#[case::replace(VariantPolicy::Replace, vec!["item-12.png"], "item-12.png")]
#[tokio::test]
async fn variant_policy_decides_what_happens_to_other_extensions(
    object_store: Arc<InMemoryObjectStore>,
    store_config: AssetStoreConfig,
    #[case] policy: VariantPolicy,
    #[case] expected_keys: Vec<&str>,
    #[case] served: &str,
) {
    let config = store_config.with_variant_policy(policy);
    let resolver = provisioned_resolver(object_store.clone(), &config).await;
    resolver.upload(12, Some("old.jpg"), byte_stream_from("old"), 3, None).await.unwrap();

    resolver.upload(12, Some("new.png"), byte_stream_from("new"), 3, None).await.unwrap();

    assert_eq!(object_store.object_keys(TEST_BUCKET).await, expected_keys);
    assert_eq!(resolver.fetch(12).await.unwrap().key, served);
}

#[rstest]
#[tokio::test]
async fn outage_is_reported_as_a_read_failure(
    object_store: Arc<InMemoryObjectStore>,
    store_config: AssetStoreConfig,
) {
    let resolver = provisioned_resolver(object_store.clone(), &store_config).await;
    resolver.upload(13, Some("a.jpg"), byte_stream_from("jpg"), 3, None).await.unwrap();
    object_store.set_unavailable(true);

    assert_matches!(resolver.fetch(13).await, Err(AssetError::ReadFailed { .. }));
    assert_matches!(resolver.delete(13).await, Err(AssetError::ReadFailed { .. }));
    assert_matches!(resolver.size(13).await, Err(AssetError::ReadFailed { .. }));
    assert!(!resolver.exists(13).await);

    object_store.set_unavailable(false);
    assert!(resolver.exists(13).await);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_for_distinct_items_do_not_interfere(
    object_store: Arc<InMemoryObjectStore>,
    store_config: AssetStoreConfig,
) {
    let resolver = provisioned_resolver(object_store, &store_config).await;

    let handles: Vec<_> = (0..16u64)
        .map(|item_id| {
            let resolver = resolver.clone();
            tokio::spawn(async move {
                let data = payload(1000 + item_id as usize);
                let size = data.len() as u64;
                resolver.upload(item_id, Some("img.png"), byte_stream_from(data.clone()), size, None).await.unwrap();
                let fetched = resolver.fetch(item_id).await.unwrap().into_bytes().await.unwrap();
                assert_eq!(fetched, data);
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    for item_id in 0..16u64 {
        assert_eq!(resolver.size(item_id).await.unwrap(), 1000 + item_id);
    }
}
