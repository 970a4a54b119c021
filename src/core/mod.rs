pub mod object_store;
pub mod signature;

pub use crate::domain::model::{ObjectReader, PutObjectRequest, UploadSize};
pub use crate::domain::ports::{BlobClient, ObjectStore};
pub use crate::utils::error::Result;
