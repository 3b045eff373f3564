pub mod asset;
pub mod common;
