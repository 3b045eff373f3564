use crate::cli::{Commands, FetchCmd, UploadCmd};
use crate::core::asset::{AssetError, AssetResolver, FetchedAsset};
use crate::core::client::storage::ByteStream;
use crate::error::GatewayResult;
use futures::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::io::ReaderStream;
use tracing::info;

/// Chunk size used when streaming a local file into the store.
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Runs `command` against an already provisioned resolver, writing its
/// result to `out`.
pub async fn execute<W>(resolver: &AssetResolver, command: &Commands, out: &mut W) -> GatewayResult<()>
where
    W: AsyncWrite + Unpin + Send,
{
    match command {
        Commands::Setup { .. } => write_line(out, &format!("bucket {} is ready", resolver.store().bucket())).await,
        Commands::Upload { upload_command } => {
            let key = upload(resolver, upload_command).await?;
            write_line(out, &key).await
        }
        Commands::Fetch { fetch_command } => fetch(resolver, fetch_command, out).await,
        Commands::Delete { item_command } => {
            for key in resolver.delete(item_command.item_id).await? {
                write_line(out, &key).await?;
            }
            Ok(())
        }
        Commands::Exists { item_command } => {
            let exists = resolver.exists(item_command.item_id).await;
            write_line(out, &exists.to_string()).await
        }
        Commands::Size { item_command } => {
            let size = resolver.size(item_command.item_id).await?;
            write_line(out, &size.to_string()).await
        }
    }
}

async fn upload(resolver: &AssetResolver, cmd: &UploadCmd) -> GatewayResult<String> {
    let file = File::open(&cmd.path).await?;
    let size = file.metadata().await?.len();
    let filename = cmd
        .filename
        .clone()
        .or_else(|| cmd.path.file_name().map(|name| name.to_string_lossy().into_owned()));
    let body: ByteStream = Box::pin(ReaderStream::with_capacity(file, UPLOAD_CHUNK_SIZE));

    let key = resolver.upload(cmd.item_id, filename.as_deref(), body, size, cmd.content_type.as_deref()).await?;
    Ok(key)
}

async fn fetch<W>(resolver: &AssetResolver, cmd: &FetchCmd, out: &mut W) -> GatewayResult<()>
where
    W: AsyncWrite + Unpin + Send,
{
    let asset = resolver.fetch(cmd.item_id).await?;
    match &cmd.output {
        Some(path) => {
            let key = asset.key.clone();
            let content_type = asset.content_type();
            let mut file = File::create(path).await?;
            let written = copy_body(asset, &mut file).await?;
            info!(key = %key, path = %path.display(), written, "Image written to file");
            write_line(out, &format!("{key} {content_type} {written}")).await
        }
        None => copy_body(asset, out).await.map(|_| ()),
    }
}

/// Forwards the image chunk by chunk; the whole object is never held in memory.
async fn copy_body<W>(asset: FetchedAsset, out: &mut W) -> GatewayResult<u64>
where
    W: AsyncWrite + Unpin + Send,
{
    let FetchedAsset { key, mut body, .. } = asset;
    let mut written = 0u64;
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|err| AssetError::ReadFailed { key: key.clone(), reason: err.to_string() })?;
        out.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    out.flush().await?;
    Ok(written)
}

async fn write_line<W>(out: &mut W, line: &str) -> GatewayResult<()>
where
    W: AsyncWrite + Unpin + Send,
{
    out.write_all(line.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}
