use crate::config::StoreConfig;
use crate::core::signature::strip_chunk_signatures;
use crate::domain::model::{PutObjectRequest, UploadSize, OCTET_STREAM};
use crate::domain::ports::{BlobClient, ObjectStore};
use crate::utils::error::{BlobError, Result, StoreError};
use crate::utils::path;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Pipeline and artifact persistence on top of an S3-compatible client.
///
/// Holds configuration only; clones share the same client.
#[derive(Clone)]
pub struct MinioObjectStore {
    client: Arc<dyn BlobClient>,
    bucket_name: String,
    base_folder: String,
    disable_multipart: bool,
}

impl MinioObjectStore {
    pub fn new(
        client: Arc<dyn BlobClient>,
        bucket_name: impl Into<String>,
        base_folder: impl Into<String>,
        disable_multipart: bool,
    ) -> Self {
        Self {
            client,
            bucket_name: bucket_name.into(),
            base_folder: base_folder.into(),
            disable_multipart,
        }
    }

    pub fn from_config(client: Arc<dyn BlobClient>, config: &StoreConfig) -> Self {
        Self::new(
            client,
            config.bucket_name.clone(),
            config.base_folder.clone(),
            config.disable_multipart,
        )
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn base_folder(&self) -> &str {
        &self.base_folder
    }

    pub fn disable_multipart(&self) -> bool {
        self.disable_multipart
    }

    fn upload_size(&self, content: &[u8]) -> UploadSize {
        if self.disable_multipart {
            UploadSize::Exact(content.len() as u64)
        } else {
            UploadSize::Unknown
        }
    }

    /// Fills `out` from the YAML object at `file_path`.
    pub async fn get_from_yaml_file_into<T>(&self, out: &mut T, file_path: &str) -> Result<()>
    where
        T: DeserializeOwned + Send,
    {
        *out = self.get_from_yaml_file(file_path).await?;
        Ok(())
    }
}

impl fmt::Debug for MinioObjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinioObjectStore")
            .field("bucket_name", &self.bucket_name)
            .field("base_folder", &self.base_folder)
            .field("disable_multipart", &self.disable_multipart)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ObjectStore for MinioObjectStore {
    fn get_pipeline_key(&self, pipeline_id: &str) -> String {
        path::join(&[self.base_folder.as_str(), pipeline_id])
    }

    async fn add_file(&self, content: &[u8], file_path: &str) -> Result<()> {
        let size = self.upload_size(content);
        tracing::debug!(
            bucket = %self.bucket_name,
            key = file_path,
            size = size.as_i64(),
            "Uploading object"
        );

        let request = PutObjectRequest {
            bucket: self.bucket_name.clone(),
            key: file_path.to_string(),
            body: content.to_vec(),
            size,
            content_type: OCTET_STREAM.to_string(),
        };

        self.client.put_object(request).await.map_err(|source| {
            tracing::warn!(key = file_path, error = %source, "Failed to store file");
            StoreError::StorageWrite {
                path: file_path.to_string(),
                source,
            }
        })
    }

    async fn delete_file(&self, file_path: &str) -> Result<()> {
        tracing::debug!(bucket = %self.bucket_name, key = file_path, "Deleting object");

        self.client
            .delete_object(&self.bucket_name, file_path)
            .await
            .map_err(|source| {
                tracing::warn!(key = file_path, error = %source, "Failed to delete file");
                StoreError::StorageDelete {
                    path: file_path.to_string(),
                    source,
                }
            })
    }

    async fn get_file(&self, file_path: &str) -> Result<Vec<u8>> {
        tracing::debug!(bucket = %self.bucket_name, key = file_path, "Fetching object");

        let read_error = |source: BlobError| {
            tracing::warn!(key = file_path, error = %source, "Failed to get file");
            StoreError::StorageRead {
                path: file_path.to_string(),
                source,
            }
        };

        let mut reader = self
            .client
            .get_object(&self.bucket_name, file_path)
            .await
            .map_err(read_error)?;

        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .await
            .map_err(|e| read_error(e.into()))?;

        if self.disable_multipart {
            let stripped = strip_chunk_signatures(&content);
            if stripped.len() != content.len() {
                tracing::debug!(
                    key = file_path,
                    removed = content.len() - stripped.len(),
                    "Stripped chunk signatures from single-part object"
                );
            }
            content = stripped;
        }

        Ok(content)
    }

    async fn add_as_yaml_file<T>(&self, value: &T, file_path: &str) -> Result<()>
    where
        T: Serialize + Sync + ?Sized,
    {
        let yaml = serde_yaml::to_string(value).map_err(|source| StoreError::Serialization {
            path: file_path.to_string(),
            source,
        })?;

        self.add_file(yaml.as_bytes(), file_path).await
    }

    async fn get_from_yaml_file<T>(&self, file_path: &str) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        let content = self.get_file(file_path).await?;

        serde_yaml::from_slice(&content).map_err(|source| StoreError::Deserialization {
            path: file_path.to_string(),
            source,
        })
    }
}
