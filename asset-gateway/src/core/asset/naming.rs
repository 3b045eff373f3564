use crate::core::asset::AssetError;
use std::fmt;
use std::str::FromStr;

/// Identifier of a catalog item, owned by the item metadata store.
pub type ItemId = u64;

pub const OBJECT_KEY_PREFIX: &str = "item-";

/// Image formats an item image may be stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageExtension {
    Jpg,
    Jpeg,
    Png,
    Gif,
}

impl ImageExtension {
    /// Every supported extension, in the default probe order.
    pub const ALL: [ImageExtension; 4] = [Self::Jpg, Self::Jpeg, Self::Png, Self::Gif];

    /// Used when an upload carries no usable file extension.
    pub const DEFAULT: ImageExtension = Self::Jpg;

    /// Extension as it appears in an object key, including the leading dot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpg => ".jpg",
            Self::Jpeg => ".jpeg",
            Self::Png => ".png",
            Self::Gif => ".gif",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Jpg | Self::Jpeg => "image/jpeg",
        }
    }

    /// Derives the extension of an uploaded file from its original name.
    ///
    /// The last `.`-delimited segment of the base name is used, lower-cased.
    /// A missing name, a name without a dot or a name ending in a dot falls
    /// back to [`ImageExtension::DEFAULT`].
    pub fn from_filename(filename: Option<&str>) -> Result<Self, AssetError> {
        let Some(filename) = filename else {
            return Ok(Self::DEFAULT);
        };
        let base_name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
        match base_name.rsplit_once('.') {
            Some((_, extension)) if !extension.trim().is_empty() => extension.parse(),
            _ => Ok(Self::DEFAULT),
        }
    }
}

impl fmt::Display for ImageExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `png`, `.png`, `PNG` and `.PNG` alike.
impl FromStr for ImageExtension {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "jpg" => Ok(Self::Jpg),
            "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "gif" => Ok(Self::Gif),
            _ => Err(AssetError::UnsupportedExtension(format!(".{normalized}"))),
        }
    }
}

/// Object key of the image stored for `item_id` under `extension`.
pub fn object_key(item_id: ItemId, extension: ImageExtension) -> String {
    format!("{OBJECT_KEY_PREFIX}{item_id}{extension}")
}
