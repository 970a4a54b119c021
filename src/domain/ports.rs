use crate::domain::model::{ObjectReader, PutObjectRequest};
use crate::utils::error::{BlobError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Minimal capability set of an S3-compatible blob store client.
#[async_trait]
pub trait BlobClient: Send + Sync {
    async fn put_object(&self, request: PutObjectRequest) -> std::result::Result<(), BlobError>;

    async fn get_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> std::result::Result<ObjectReader, BlobError>;

    async fn delete_object(&self, bucket: &str, key: &str) -> std::result::Result<(), BlobError>;
}

/// File-level and YAML-level persistence under a base folder.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Key of a pipeline's persisted definition.
    fn get_pipeline_key(&self, pipeline_id: &str) -> String;

    async fn add_file(&self, content: &[u8], file_path: &str) -> Result<()>;

    async fn delete_file(&self, file_path: &str) -> Result<()>;

    async fn get_file(&self, file_path: &str) -> Result<Vec<u8>>;

    async fn add_as_yaml_file<T>(&self, value: &T, file_path: &str) -> Result<()>
    where
        T: Serialize + Sync + ?Sized;

    async fn get_from_yaml_file<T>(&self, file_path: &str) -> Result<T>
    where
        T: DeserializeOwned + Send;
}
