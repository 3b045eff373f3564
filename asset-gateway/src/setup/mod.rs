use crate::cli::GatewayArgs;
use crate::core::asset::{AssetResolver, AssetStore, BucketProvisioning};
use crate::core::client::{AwsS3Client, ObjectStoreClient};
use crate::core::config::AssetStoreConfig;
use crate::error::GatewayResult;
use crate::types::params::{asset_store_config, AWSCredentials, AssetArgs, StorageArgs};
use std::sync::Arc;
use tracing::{debug, info};

/// Builds the S3-backed resolver described by `args` and provisions its bucket.
///
/// Any failure here is fatal: traffic must not be served against a bucket
/// that could not be provisioned.
pub async fn setup_gateway(args: &GatewayArgs) -> GatewayResult<AssetResolver> {
    let storage_params = StorageArgs::try_from(args.clone())?;
    let asset_params = AssetArgs::try_from(args.clone())?;
    let config = asset_store_config(&storage_params, &asset_params)?;

    debug!("Storage Params: {:?}", storage_params);
    debug!("Asset Params: {:?}", asset_params);

    let aws_config = AWSCredentials::from(args.aws_config_args.clone()).get_aws_config().await;
    let client = Arc::new(AwsS3Client::new(&aws_config, &storage_params));
    info!("Object store client initialized - S3");

    provision(client, &config).await
}

/// Ensures the configured bucket exists and returns a resolver bound to it.
pub async fn provision(client: Arc<dyn ObjectStoreClient>, config: &AssetStoreConfig) -> GatewayResult<AssetResolver> {
    let store = AssetStore::new(client, config);
    match store.ensure_bucket().await? {
        BucketProvisioning::Created => info!(bucket = store.bucket(), "Image bucket provisioned"),
        BucketProvisioning::AlreadyExists => debug!(bucket = store.bucket(), "Image bucket already provisioned"),
    }
    Ok(AssetResolver::new(store, config))
}
