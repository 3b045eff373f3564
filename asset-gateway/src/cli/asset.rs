use crate::core::config::VariantPolicy;
use clap::Args;

/// Parameters controlling how item images are resolved.
#[derive(Debug, Clone, Args)]
pub struct AssetCliArgs {
    /// Extensions tried, in order, when an image is looked up by item id.
    #[arg(
        env = "ASSET_GATEWAY_EXTENSION_PROBE_ORDER",
        long,
        value_delimiter = ',',
        default_value = ".jpg,.jpeg,.png,.gif"
    )]
    pub extension_probe_order: Vec<String>,

    /// What an upload does with images stored for the item under other extensions.
    #[arg(env = "ASSET_GATEWAY_VARIANT_POLICY", long, value_enum, default_value_t = VariantPolicy::Keep)]
    pub variant_policy: VariantPolicy,
}
