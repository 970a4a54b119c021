// Adapters layer: concrete BlobClient implementations for the object store.

pub mod local;
pub mod memory;

#[cfg(feature = "s3")]
pub mod s3;

pub use local::LocalBlobClient;
pub use memory::InMemoryBlobClient;

#[cfg(feature = "s3")]
pub use s3::S3BlobClient;
