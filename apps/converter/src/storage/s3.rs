use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::debug;

use crate::config::S3Settings;
use crate::storage::{ObjectStore, PutObject, StoreError};

/// `ObjectStore` backed by AWS S3 or an S3-compatible endpoint (MinIO).
#[derive(Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        S3Store { client }
    }

    /// Builds a client from the process configuration.
    ///
    /// Static credentials are used when both keys are configured; otherwise the
    /// default AWS provider chain applies. A custom endpoint switches to
    /// path-style addressing.
    pub async fn from_settings(settings: &S3Settings) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()));

        if let (Some(access_key), Some(secret_key)) =
            (&settings.access_key_id, &settings.secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key,
                secret_key,
                None,
                None,
                "pdf-converter-static",
            ));
        }
        if let Some(endpoint) = &settings.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(settings.endpoint.is_some())
            .build();

        S3Store::new(aws_sdk_s3::Client::from_conf(s3_config))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify(e, bucket, key))?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Io(format!("reading s3://{bucket}/{key}: {e}")))?
            .into_bytes();

        debug!("Fetched {} bytes from s3://{}/{}", body.len(), bucket, key);
        Ok(body)
    }

    async fn put(&self, object: PutObject) -> Result<(), StoreError> {
        let PutObject {
            bucket,
            key,
            body,
            content_type,
            metadata,
        } = object;

        let metadata: HashMap<String, String> = metadata.into_iter().collect();
        self.client
            .put_object()
            .bucket(&bucket)
            .key(&key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .set_metadata((!metadata.is_empty()).then_some(metadata))
            .send()
            .await
            .map_err(|e| classify(e, &bucket, &key))?;

        debug!("Stored s3://{}/{}", bucket, key);
        Ok(())
    }
}

/// Maps an SDK failure onto the store error taxonomy by S3 error code.
fn classify<E, R>(err: SdkError<E, R>, bucket: &str, key: &str) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    match err.code() {
        Some("NoSuchKey" | "NoSuchBucket" | "NotFound") => StoreError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        Some("AccessDenied" | "Forbidden" | "InvalidAccessKeyId" | "SignatureDoesNotMatch") => {
            StoreError::Access(format!("s3://{bucket}/{key}: {}", DisplayErrorContext(&err)))
        }
        _ => StoreError::Io(format!("s3://{bucket}/{key}: {}", DisplayErrorContext(&err))),
    }
}
