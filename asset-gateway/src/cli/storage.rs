use clap::Args;

pub const DEFAULT_BUCKET_NAME: &str = "item-images";

/// Parameters used to config the S3-compatible object store.
#[derive(Debug, Clone, Args)]
pub struct AWSS3CliArgs {
    /// Name of the bucket holding every item image.
    #[arg(env = "ASSET_GATEWAY_S3_BUCKET_NAME", long, default_value = DEFAULT_BUCKET_NAME)]
    pub bucket_name: String,

    /// Endpoint of an S3-compatible store (e.g. MinIO). Uses AWS S3 when unset.
    #[arg(env = "ASSET_GATEWAY_S3_ENDPOINT_URL", long)]
    pub s3_endpoint_url: Option<String>,

    /// Address buckets as `<endpoint>/<bucket>` instead of `<bucket>.<endpoint>`.
    #[arg(env = "ASSET_GATEWAY_S3_FORCE_PATH_STYLE", long)]
    pub force_path_style: bool,
}
