pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

#[cfg(feature = "s3")]
pub use adapters::S3BlobClient;

pub use adapters::{InMemoryBlobClient, LocalBlobClient};
pub use config::{toml_config::TomlConfig, Backend, S3Settings, StoreConfig};
pub use crate::core::{object_store::MinioObjectStore, BlobClient, ObjectStore, UploadSize};
pub use utils::error::{BlobError, Result, StoreError};
