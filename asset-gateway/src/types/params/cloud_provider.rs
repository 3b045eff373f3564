use crate::cli::provider::AWSConfigCliArgs;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::config::Credentials;

const CREDENTIALS_PROVIDER_NAME: &str = "asset-gateway-cli";

#[derive(Debug, Clone)]
pub struct AWSCredentials {
    pub region: Option<String>,
    pub static_keys: Option<(String, String)>,
}

impl AWSCredentials {
    /// Loads the SDK config from the environment, overriding the region and
    /// credentials when they were given explicitly.
    pub async fn get_aws_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some((access_key_id, secret_access_key)) = &self.static_keys {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                CREDENTIALS_PROVIDER_NAME,
            ));
        }
        loader.load().await
    }
}

impl From<AWSConfigCliArgs> for AWSCredentials {
    fn from(args: AWSConfigCliArgs) -> Self {
        let static_keys = args.aws_access_key_id.zip(args.aws_secret_access_key);
        Self { region: args.aws_region, static_keys }
    }
}
