pub mod cloud_provider;

use crate::cli::GatewayArgs;
use crate::core::asset::ImageExtension;
use crate::core::config::{AssetStoreConfig, VariantPolicy};
use crate::error::{GatewayError, GatewayResult};
pub use cloud_provider::AWSCredentials;

/// StorageArgs - Arguments used to reach the bucket
#[derive(Debug, Clone)]
pub struct StorageArgs {
    pub bucket_name: String,
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
}

/// AssetArgs - Arguments used to resolve item images
#[derive(Debug, Clone)]
pub struct AssetArgs {
    pub probe_order: Vec<ImageExtension>,
    pub variant_policy: VariantPolicy,
}

impl TryFrom<GatewayArgs> for StorageArgs {
    type Error = GatewayError;
    fn try_from(args: GatewayArgs) -> Result<Self, Self::Error> {
        let bucket_name = args.aws_s3_args.bucket_name.trim().to_string();
        if bucket_name.is_empty() {
            return Err(GatewayError::SetupCommandError("Bucket name not found".to_string()));
        }
        let endpoint_url = args.aws_s3_args.s3_endpoint_url.filter(|url| !url.trim().is_empty());
        Ok(Self { bucket_name, endpoint_url, force_path_style: args.aws_s3_args.force_path_style })
    }
}

impl TryFrom<GatewayArgs> for AssetArgs {
    type Error = GatewayError;
    fn try_from(args: GatewayArgs) -> Result<Self, Self::Error> {
        let probe_order = args
            .asset_args
            .extension_probe_order
            .iter()
            .filter(|extension| !extension.trim().is_empty())
            .map(|extension| extension.parse::<ImageExtension>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { probe_order, variant_policy: args.asset_args.variant_policy })
    }
}

/// Builds the validated, immutable store configuration from its parts.
pub fn asset_store_config(storage: &StorageArgs, assets: &AssetArgs) -> GatewayResult<AssetStoreConfig> {
    Ok(AssetStoreConfig::new(storage.bucket_name.clone())?
        .with_probe_order(assets.probe_order.clone())?
        .with_variant_policy(assets.variant_policy))
}
