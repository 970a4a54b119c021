use std::fmt;
use std::pin::Pin;

use tokio::io::AsyncRead;

/// Content type attached to every uploaded object.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Size hint passed to the client along with an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSize {
    /// Single-part upload of exactly this many bytes.
    Exact(u64),
    /// Length not declared; the client picks its own (multi-part) strategy.
    Unknown,
}

impl UploadSize {
    /// Wire form used by S3-style clients: `-1` stands for an unknown size.
    pub fn as_i64(self) -> i64 {
        match self {
            UploadSize::Exact(size) => size as i64,
            UploadSize::Unknown => -1,
        }
    }

    pub fn exact(self) -> Option<u64> {
        match self {
            UploadSize::Exact(size) => Some(size),
            UploadSize::Unknown => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct PutObjectRequest {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
    pub size: UploadSize,
    pub content_type: String,
}

impl fmt::Debug for PutObjectRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PutObjectRequest")
            .field("bucket", &self.bucket)
            .field("key", &self.key)
            .field("body_len", &self.body.len())
            .field("size", &self.size)
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// Streamed object content handed back by a client.
pub type ObjectReader = Pin<Box<dyn AsyncRead + Send>>;
