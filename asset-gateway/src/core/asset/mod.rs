//! Item image storage: raw object operations against the configured bucket
//! ([`AssetStore`]) and item-id addressing on top of them ([`AssetResolver`]).

pub mod error;
pub mod naming;
pub mod resolver;
pub mod store;

pub use error::{AssetError, AssetResult};
pub use naming::{ImageExtension, ItemId};
pub use resolver::{AssetResolver, FetchedAsset};
pub use store::{AssetStore, BucketProvisioning, Presence};
