use crate::core::asset::{AssetError, ImageExtension};
use clap::ValueEnum;
use std::collections::HashSet;
use std::sync::Arc;

/// What an upload does with images stored for the same item under other extensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum VariantPolicy {
    /// Leave other variants in place; the probe order decides which one is served.
    #[default]
    Keep,
    /// Delete every other variant before storing the new image.
    Replace,
}

/// Immutable configuration shared by the asset store and resolver.
///
/// Built once at startup and injected; nothing re-reads it per request.
#[derive(Debug, Clone)]
pub struct AssetStoreConfig {
    bucket_name: String,
    probe_order: Arc<[ImageExtension]>,
    variant_policy: VariantPolicy,
}

impl AssetStoreConfig {
    /// Config for `bucket_name` with the default probe order and [`VariantPolicy::Keep`].
    pub fn new(bucket_name: impl Into<String>) -> Result<Self, AssetError> {
        let bucket_name = bucket_name.into();
        validate_bucket_name(&bucket_name)?;
        Ok(Self { bucket_name, probe_order: Arc::from(ImageExtension::ALL), variant_policy: VariantPolicy::default() })
    }

    pub fn with_probe_order(mut self, probe_order: Vec<ImageExtension>) -> Result<Self, AssetError> {
        if probe_order.is_empty() {
            return Err(AssetError::InvalidConfig("extension probe order must not be empty".to_string()));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = probe_order.iter().find(|extension| !seen.insert(**extension)) {
            return Err(AssetError::InvalidConfig(format!("extension {duplicate} listed more than once")));
        }
        self.probe_order = Arc::from(probe_order);
        Ok(self)
    }

    pub fn with_variant_policy(mut self, variant_policy: VariantPolicy) -> Self {
        self.variant_policy = variant_policy;
        self
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn probe_order(&self) -> &[ImageExtension] {
        &self.probe_order
    }

    pub fn variant_policy(&self) -> VariantPolicy {
        self.variant_policy
    }
}

/// S3 naming rules: 3-63 characters of lowercase letters, digits, `.` and `-`,
/// starting and ending with a letter or digit.
fn validate_bucket_name(name: &str) -> Result<(), AssetError> {
    let invalid = |reason: &str| AssetError::InvalidConfig(format!("bucket name {name:?} {reason}"));

    if !(3..=63).contains(&name.len()) {
        return Err(invalid("must be between 3 and 63 characters long"));
    }
    if !name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-') {
        return Err(invalid("may only contain lowercase letters, digits, '.' and '-'"));
    }
    let alphanumeric = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphanumeric());
    if !alphanumeric(name.chars().next()) || !alphanumeric(name.chars().last()) {
        return Err(invalid("must start and end with a letter or digit"));
    }
    Ok(())
}
