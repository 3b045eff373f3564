use crate::core::asset::ItemId;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod asset;
pub mod provider;
pub mod storage;

#[derive(Parser, Debug)]
#[command(
    name = "asset-gateway",
    about = "Store and serve catalog item images in an S3-compatible bucket",
    after_help = "Examples:\n  \
    asset-gateway setup --bucket-name item-images\n  \
    asset-gateway upload 42 ./photo.png\n  \
    asset-gateway fetch 42 --output ./item-42.png"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the image bucket if it does not exist
    Setup {
        #[command(flatten)]
        gateway_args: GatewayArgs,
    },
    /// Store an image for an item
    Upload {
        #[command(flatten)]
        upload_command: UploadCmd,
    },
    /// Write an item's image to a file or stdout
    Fetch {
        #[command(flatten)]
        fetch_command: FetchCmd,
    },
    /// Delete every stored variant of an item's image
    Delete {
        #[command(flatten)]
        item_command: ItemCmd,
    },
    /// Print whether an item has an image
    Exists {
        #[command(flatten)]
        item_command: ItemCmd,
    },
    /// Print the size in bytes of an item's image
    Size {
        #[command(flatten)]
        item_command: ItemCmd,
    },
}

impl Commands {
    pub fn gateway_args(&self) -> &GatewayArgs {
        match self {
            Commands::Setup { gateway_args } => gateway_args,
            Commands::Upload { upload_command } => &upload_command.gateway_args,
            Commands::Fetch { fetch_command } => &fetch_command.gateway_args,
            Commands::Delete { item_command } | Commands::Exists { item_command } | Commands::Size { item_command } => {
                &item_command.gateway_args
            }
        }
    }
}

/// Connection and resolution settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GatewayArgs {
    #[clap(flatten, next_help_heading = "AWS")]
    pub aws_config_args: provider::AWSConfigCliArgs,

    #[clap(flatten, next_help_heading = "Storage")]
    pub aws_s3_args: storage::AWSS3CliArgs,

    #[clap(flatten, next_help_heading = "Assets")]
    pub asset_args: asset::AssetCliArgs,
}

#[derive(Args, Debug, Clone)]
pub struct UploadCmd {
    pub item_id: ItemId,

    /// Image file to upload
    pub path: PathBuf,

    /// File name used to derive the extension, defaults to the name of `path`
    #[arg(long)]
    pub filename: Option<String>,

    /// Content type recorded with the image, defaults to the one implied by the extension
    #[arg(long)]
    pub content_type: Option<String>,

    #[clap(flatten)]
    pub gateway_args: GatewayArgs,
}

#[derive(Args, Debug, Clone)]
pub struct FetchCmd {
    pub item_id: ItemId,

    /// Write the image here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[clap(flatten)]
    pub gateway_args: GatewayArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ItemCmd {
    pub item_id: ItemId,

    #[clap(flatten)]
    pub gateway_args: GatewayArgs,
}
