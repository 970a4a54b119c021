use crate::config::S3Settings;
use crate::domain::model::{ObjectReader, PutObjectRequest};
use crate::domain::ports::BlobClient;
use crate::utils::error::BlobError;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use std::io::Cursor;

/// [`BlobClient`] backed by the AWS SDK; works against Minio with path-style addressing.
#[derive(Debug, Clone)]
pub struct S3BlobClient {
    client: S3Client,
}

impl S3BlobClient {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    pub async fn from_settings(settings: &S3Settings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()));

        if let (Some(access_key), Some(secret_key)) = (&settings.access_key, &settings.secret_key) {
            loader = loader.credentials_provider(Credentials::new(
                access_key.clone(),
                secret_key.clone(),
                None,
                None,
                "pipeline-store",
            ));
        }

        let shared = loader.load().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared).force_path_style(true);
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        tracing::info!(
            endpoint = settings.endpoint.as_deref().unwrap_or("default"),
            region = %settings.region,
            "S3 client initialized"
        );
        Self::new(S3Client::from_conf(builder.build()))
    }
}

fn backend_error(err: impl std::error::Error) -> BlobError {
    BlobError::Backend {
        message: DisplayErrorContext(err).to_string(),
    }
}

#[async_trait]
impl BlobClient for S3BlobClient {
    async fn put_object(&self, request: PutObjectRequest) -> Result<(), BlobError> {
        let mut put = self
            .client
            .put_object()
            .bucket(&request.bucket)
            .key(&request.key)
            .content_type(&request.content_type);

        if let Some(len) = request.size.exact() {
            put = put.content_length(len as i64);
        }

        put.body(ByteStream::from(request.body))
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectReader, BlobError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| match err.into_service_error() {
                GetObjectError::NoSuchKey(_) => BlobError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                },
                err => backend_error(err),
            })?;

        let data = output.body.collect().await.map_err(backend_error)?;
        Ok(Box::pin(Cursor::new(data.into_bytes().to_vec())))
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), BlobError> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }
}
