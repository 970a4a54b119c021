use crate::domain::model::{ObjectReader, PutObjectRequest};
use crate::domain::ports::BlobClient;
use crate::utils::error::BlobError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Filesystem-backed blob store: each bucket is a directory under `root`
/// and each key a relative file path inside it.
#[derive(Debug, Clone)]
pub struct LocalBlobClient {
    root: PathBuf,
}

impl LocalBlobClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, BlobError> {
        check_segment(bucket)?;
        check_segment(key)?;
        Ok(self.root.join(bucket).join(key))
    }
}

fn check_segment(key: &str) -> Result<(), BlobError> {
    let invalid = |reason: &str| BlobError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    if key.is_empty() {
        return Err(invalid("key cannot be empty"));
    }

    for component in Path::new(key).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => return Err(invalid("parent directory references are not allowed")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("absolute keys are not allowed"))
            }
        }
    }
    Ok(())
}

#[async_trait]
impl BlobClient for LocalBlobClient {
    async fn put_object(&self, request: PutObjectRequest) -> Result<(), BlobError> {
        let full_path = self.object_path(&request.bucket, &request.key)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&full_path, &request.body).await?;
        tracing::trace!(path = %full_path.display(), bytes = request.body.len(), "Wrote object file");
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectReader, BlobError> {
        let full_path = self.object_path(bucket, key)?;

        let not_found = || BlobError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        };

        let file = match fs::File::open(&full_path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(e.into()),
        };

        // a key that names a directory holds no object
        if !file.metadata().await?.is_file() {
            return Err(not_found());
        }

        Ok(Box::pin(file))
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), BlobError> {
        let full_path = self.object_path(bucket, key)?;

        match fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
