use clap::Args;

/// Parameters used to config AWS.
#[derive(Debug, Clone, Args)]
pub struct AWSConfigCliArgs {
    /// The AWS region. Falls back to the standard AWS environment when unset.
    #[arg(env = "ASSET_GATEWAY_AWS_REGION", long)]
    pub aws_region: Option<String>,

    /// Static access key id. Both keys must be given to bypass the default credential chain.
    #[arg(env = "ASSET_GATEWAY_AWS_ACCESS_KEY_ID", long, requires = "aws_secret_access_key")]
    pub aws_access_key_id: Option<String>,

    #[arg(env = "ASSET_GATEWAY_AWS_SECRET_ACCESS_KEY", long, hide_env_values = true, requires = "aws_access_key_id")]
    pub aws_secret_access_key: Option<String>,
}
