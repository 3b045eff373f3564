use crate::core::client::storage::{ByteStream, ObjectBody, ObjectStat, ObjectStoreClient, ObjectStoreError};
use crate::types::params::StorageArgs;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::config::RequestChecksumCalculation;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::primitives::ByteStream as S3ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use aws_smithy_types::body::SdkBody;
use bytes::Bytes;
use futures::Stream;
use http_body::{Body, Frame, SizeHint};
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio_util::io::ReaderStream;

const DEFAULT_REGION: &str = "us-east-1";

/// [`ObjectStoreClient`] backed by the AWS SDK. Works against AWS S3 and
/// S3-compatible stores such as MinIO when `force_path_style` is set.
#[derive(Clone, Debug)]
pub struct AwsS3Client {
    client: Arc<Client>,
}

impl AwsS3Client {
    /// Creates a new instance of AwsS3Client with the provided AWS configuration.
    /// # Arguments
    /// * `aws_config` - The AWS configuration (region and credentials).
    /// * `args` - The storage arguments carrying the optional endpoint override.
    ///
    /// # Returns
    /// * `Self` - The new instance of AwsS3Client.
    pub fn new(aws_config: &SdkConfig, args: &StorageArgs) -> Self {
        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(aws_config);

        if let Some(endpoint_url) = &args.endpoint_url {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint_url.as_str());
        }
        s3_config_builder = s3_config_builder.force_path_style(args.force_path_style);
        // Default checksums switch streaming puts to aws-chunked encoding, which
        // replaces the declared Content-Length and is not accepted by every S3-compatible store.
        s3_config_builder = s3_config_builder.request_checksum_calculation(RequestChecksumCalculation::WhenRequired);

        let client = Client::from_conf(s3_config_builder.build());
        Self { client: Arc::new(client) }
    }

    pub fn client(&self) -> &Client {
        self.client.as_ref()
    }

    fn region(&self) -> String {
        self.client.config().region().map(|r| r.to_string()).unwrap_or_else(|| DEFAULT_REGION.to_string())
    }
}

#[async_trait]
impl ObjectStoreClient for AwsS3Client {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, ObjectStoreError> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) || is_http_not_found(&err) => {
                Ok(false)
            }
            Err(err) => Err(transport_error("head_bucket", bucket, &err)),
        }
    }

    async fn make_bucket(&self, bucket: &str) -> Result<(), ObjectStoreError> {
        let region = self.region();
        let mut bucket_builder = self.client.create_bucket().bucket(bucket);

        // us-east-1 rejects an explicit location constraint
        if region != DEFAULT_REGION {
            let constraint = BucketLocationConstraint::from(region.as_str());
            let cfg = CreateBucketConfiguration::builder().location_constraint(constraint).build();
            bucket_builder = bucket_builder.create_bucket_configuration(cfg);
        }

        match bucket_builder.send().await {
            Ok(_) => {
                tracing::debug!(log_type = "ObjectStore", category = "create_bucket", bucket, region = %region, "Bucket created");
                Ok(())
            }
            Err(err) if err.as_service_error().is_some_and(|e| e.is_bucket_already_owned_by_you()) => Ok(()),
            Err(err) => Err(transport_error("create_bucket", bucket, &err)),
        }
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ByteStream,
        size: u64,
        content_type: &str,
    ) -> Result<(), ObjectStoreError> {
        let content_length = i64::try_from(size)
            .map_err(|_| ObjectStoreError::Transport(format!("object size {size} exceeds the S3 limit")))?;
        let body = S3ByteStream::new(SdkBody::from_body_1_x(UploadBody::new(body, size)));

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_length(content_length)
            .content_type(content_type)
            .body(body)
            .send()
            .await
            .map_err(|err| transport_error("put_object", key, &err))?;

        tracing::debug!(
            log_type = "ObjectStore",
            category = "object_store_call",
            bucket,
            key,
            size,
            "Successfully put object"
        );
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectBody, ObjectStoreError> {
        let output = match self.client.get_object().bucket(bucket).key(key).send().await {
            Ok(output) => output,
            Err(err) if err.as_service_error().is_some_and(|e| e.is_no_such_key()) || is_http_not_found(&err) => {
                return Err(ObjectStoreError::not_found(bucket, key));
            }
            Err(err) => return Err(transport_error("get_object", key, &err)),
        };

        let stat = ObjectStat {
            size: output.content_length().and_then(|len| u64::try_from(len).ok()).unwrap_or_default(),
            content_type: output.content_type().map(str::to_string),
        };
        let stream = ReaderStream::new(output.body.into_async_read());

        Ok(ObjectBody { stat, stream: Box::pin(stream) })
    }

    async fn stat_object(&self, bucket: &str, key: &str) -> Result<ObjectStat, ObjectStoreError> {
        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(output) => Ok(ObjectStat {
                size: output.content_length().and_then(|len| u64::try_from(len).ok()).unwrap_or_default(),
                content_type: output.content_type().map(str::to_string),
            }),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) || is_http_not_found(&err) => {
                Err(ObjectStoreError::not_found(bucket, key))
            }
            Err(err) => Err(transport_error("head_object", key, &err)),
        }
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<(), ObjectStoreError> {
        match self.client.delete_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(()),
            // Some S3-compatible stores answer 404 instead of 204 for absent keys
            Err(err) if is_http_not_found(&err) => Ok(()),
            Err(err) => Err(transport_error("delete_object", key, &err)),
        }
    }
}

fn is_http_not_found<E>(err: &SdkError<E>) -> bool {
    err.raw_response().is_some_and(|response| response.status().as_u16() == 404)
}

fn transport_error<E>(operation: &str, target: &str, err: &SdkError<E>) -> ObjectStoreError
where
    E: std::error::Error + 'static,
{
    ObjectStoreError::Transport(format!("{operation} failed for {target}: {}", DisplayErrorContext(err)))
}

/// Request body adapter that hands the caller's stream to the SDK without
/// buffering it, advertising the exact declared length.
pub(crate) struct UploadBody {
    // Mutex only makes the body `Sync`; polling goes through `get_mut`.
    stream: Mutex<ByteStream>,
    size: u64,
}

impl UploadBody {
    pub(crate) fn new(stream: ByteStream, size: u64) -> Self {
        Self { stream: Mutex::new(stream), size }
    }
}

impl Body for UploadBody {
    type Data = Bytes;
    type Error = io::Error;

    fn poll_frame(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let stream = self.get_mut().stream.get_mut().unwrap_or_else(|poisoned| poisoned.into_inner());
        stream.as_mut().poll_next(cx).map(|chunk| chunk.map(|result| result.map(Frame::data)))
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(self.size)
    }
}
