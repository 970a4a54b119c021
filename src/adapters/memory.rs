use crate::domain::model::{ObjectReader, PutObjectRequest};
use crate::domain::ports::BlobClient;
use crate::utils::error::BlobError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Put,
    Get,
    Delete,
}

/// A call observed by [`InMemoryBlobClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Put(PutObjectRequest),
    Get { bucket: String, key: String },
    Delete { bucket: String, key: String },
}

impl RecordedCall {
    pub fn operation(&self) -> Operation {
        match self {
            RecordedCall::Put(_) => Operation::Put,
            RecordedCall::Get { .. } => Operation::Get,
            RecordedCall::Delete { .. } => Operation::Delete,
        }
    }
}

#[derive(Default)]
struct State {
    objects: HashMap<(String, String), Vec<u8>>,
    calls: Vec<RecordedCall>,
    failing: HashSet<Operation>,
}

/// Process-local blob store. Records every call and can be told to fail.
#[derive(Clone, Default)]
pub struct InMemoryBlobClient {
    state: Arc<Mutex<State>>,
}

impl InMemoryBlobClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call of `operation` fail with a backend error.
    pub async fn fail_on(&self, operation: Operation) {
        self.state.lock().await.failing.insert(operation);
    }

    pub async fn recover(&self, operation: Operation) {
        self.state.lock().await.failing.remove(&operation);
    }

    /// Stores bytes as-is, bypassing any upload logic.
    pub async fn insert_raw(&self, bucket: &str, key: &str, content: impl Into<Vec<u8>>) {
        self.state
            .lock()
            .await
            .objects
            .insert((bucket.to_string(), key.to_string()), content.into());
    }

    pub async fn raw(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .await
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().await.calls.clone()
    }

    pub async fn object_count(&self) -> usize {
        self.state.lock().await.objects.len()
    }
}

fn injected(operation: Operation, bucket: &str, key: &str) -> BlobError {
    BlobError::Backend {
        message: format!("injected {:?} failure for {}/{}", operation, bucket, key),
    }
}

#[async_trait]
impl BlobClient for InMemoryBlobClient {
    async fn put_object(&self, request: PutObjectRequest) -> Result<(), BlobError> {
        let mut state = self.state.lock().await;
        state.calls.push(RecordedCall::Put(request.clone()));

        if state.failing.contains(&Operation::Put) {
            return Err(injected(Operation::Put, &request.bucket, &request.key));
        }

        state
            .objects
            .insert((request.bucket, request.key), request.body);
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectReader, BlobError> {
        let mut state = self.state.lock().await;
        state.calls.push(RecordedCall::Get {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });

        if state.failing.contains(&Operation::Get) {
            return Err(injected(Operation::Get, bucket, key));
        }

        let content = state
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| BlobError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })?;

        Ok(Box::pin(Cursor::new(content)))
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), BlobError> {
        let mut state = self.state.lock().await;
        state.calls.push(RecordedCall::Delete {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });

        if state.failing.contains(&Operation::Delete) {
            return Err(injected(Operation::Delete, bucket, key));
        }

        state.objects.remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }
}
