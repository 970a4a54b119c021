#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::{InMemoryBlobClient, LocalBlobClient};
use crate::domain::ports::BlobClient;
use crate::utils::error::{Result, StoreError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_BASE_FOLDER: &str = "pipelines";
pub const DEFAULT_LOCAL_ROOT: &str = "./data";
pub const DEFAULT_REGION: &str = "us-east-1";

fn default_base_folder() -> String {
    DEFAULT_BASE_FOLDER.to_string()
}

fn default_disable_multipart() -> bool {
    true
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

/// Connection settings for an S3-compatible endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Settings {
    /// Custom endpoint such as `http://minio:9000`; AWS is used when absent.
    pub endpoint: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

impl Default for S3Settings {
    fn default() -> Self {
        Self {
            endpoint: None,
            region: default_region(),
            access_key: None,
            secret_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Backend {
    Memory,
    Local { root: PathBuf },
    S3(S3Settings),
}

impl Default for Backend {
    fn default() -> Self {
        Backend::Local {
            root: PathBuf::from(DEFAULT_LOCAL_ROOT),
        }
    }
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Memory => "memory",
            Backend::Local { .. } => "local",
            Backend::S3(_) => "s3",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub bucket_name: String,
    #[serde(default = "default_base_folder")]
    pub base_folder: String,
    #[serde(default = "default_disable_multipart")]
    pub disable_multipart: bool,
    #[serde(default)]
    pub backend: Backend,
}

impl StoreConfig {
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            base_folder: default_base_folder(),
            disable_multipart: default_disable_multipart(),
            backend: Backend::default(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let bucket_name =
            env::var("OBJECT_STORE_BUCKET").map_err(|_| StoreError::MissingConfigError {
                field: "OBJECT_STORE_BUCKET".to_string(),
            })?;

        let disable_multipart = match env::var("OBJECT_STORE_DISABLE_MULTIPART") {
            Ok(value) => parse_bool("OBJECT_STORE_DISABLE_MULTIPART", &value)?,
            Err(_) => default_disable_multipart(),
        };

        let backend = match env::var("OBJECT_STORE_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .as_str()
        {
            "memory" => Backend::Memory,
            "local" => Backend::Local {
                root: env::var("OBJECT_STORE_LOCAL_ROOT")
                    .unwrap_or_else(|_| DEFAULT_LOCAL_ROOT.to_string())
                    .into(),
            },
            "s3" => Backend::S3(S3Settings {
                endpoint: env::var("OBJECT_STORE_ENDPOINT").ok(),
                region: env::var("OBJECT_STORE_REGION").unwrap_or_else(|_| default_region()),
                access_key: env::var("OBJECT_STORE_ACCESS_KEY").ok(),
                secret_key: env::var("OBJECT_STORE_SECRET_KEY").ok(),
            }),
            other => {
                return Err(StoreError::InvalidConfigValueError {
                    field: "OBJECT_STORE_BACKEND".to_string(),
                    value: other.to_string(),
                    reason: "Expected one of: memory, local, s3".to_string(),
                })
            }
        };

        Ok(Self {
            bucket_name,
            base_folder: env::var("OBJECT_STORE_BASE_FOLDER").unwrap_or_else(|_| default_base_folder()),
            disable_multipart,
            backend,
        })
    }

    /// Builds the blob client described by `backend`.
    pub async fn connect(&self) -> Result<Arc<dyn BlobClient>> {
        tracing::debug!(backend = self.backend.name(), bucket = %self.bucket_name, "Connecting object store");

        match &self.backend {
            Backend::Memory => Ok(Arc::new(InMemoryBlobClient::new())),
            Backend::Local { root } => Ok(Arc::new(LocalBlobClient::new(root.clone()))),
            #[cfg(feature = "s3")]
            Backend::S3(settings) => Ok(Arc::new(
                crate::adapters::S3BlobClient::from_settings(settings).await,
            )),
            #[cfg(not(feature = "s3"))]
            Backend::S3(_) => Err(StoreError::ConfigError {
                message: "S3 backend requested but pipeline-store was built without the `s3` feature"
                    .to_string(),
            }),
        }
    }
}

pub(crate) fn parse_bool(field_name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(StoreError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected a boolean".to_string(),
        }),
    }
}

impl Validate for StoreConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_bucket_name("bucket_name", &self.bucket_name)?;
        validation::validate_key_prefix("base_folder", &self.base_folder)?;

        match &self.backend {
            Backend::Memory => {}
            Backend::Local { root } => {
                validation::validate_path("backend.root", &root.to_string_lossy())?;
            }
            Backend::S3(settings) => {
                if let Some(endpoint) = &settings.endpoint {
                    validation::validate_url("backend.endpoint", endpoint)?;
                }
                validation::validate_region("backend.region", &settings.region)?;
                if settings.access_key.is_some() != settings.secret_key.is_some() {
                    return Err(StoreError::ConfigError {
                        message: "access_key and secret_key must be provided together".to_string(),
                    });
                }
            }
        }

        tracing::debug!("✅ Object store configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::new("mlpipeline");
        assert_eq!(config.base_folder, "pipelines");
        assert!(config.disable_multipart);
        assert_eq!(config.backend.name(), "local");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = StoreConfig::new("Bad_Bucket");
        assert!(config.validate().is_err());

        config.bucket_name = "mlpipeline".to_string();
        config.backend = Backend::S3(S3Settings {
            endpoint: Some("minio:9000".to_string()),
            ..S3Settings::default()
        });
        assert!(config.validate().is_err());

        config.backend = Backend::S3(S3Settings {
            endpoint: Some("http://minio:9000".to_string()),
            access_key: Some("minio".to_string()),
            ..S3Settings::default()
        });
        assert!(matches!(
            config.validate(),
            Err(StoreError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("f", "true").unwrap());
        assert!(parse_bool("f", " YES ").unwrap());
        assert!(!parse_bool("f", "0").unwrap());
        assert!(parse_bool("f", "maybe").is_err());
    }

    #[tokio::test]
    async fn test_connect_memory_backend() {
        let mut config = StoreConfig::new("mlpipeline");
        config.backend = Backend::Memory;
        assert!(config.connect().await.is_ok());
    }
}
