use thiserror::Error;

/// Errors raised by a [`BlobClient`](crate::domain::ports::BlobClient) implementation.
#[derive(Error, Debug)]
pub enum BlobError {
    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("Invalid object key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Object store backend error: {message}")]
    Backend { message: String },
}

impl BlobError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BlobError::NotFound { .. })
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to store file {path}: {source}")]
    StorageWrite {
        path: String,
        #[source]
        source: BlobError,
    },

    #[error("Failed to get file {path}: {source}")]
    StorageRead {
        path: String,
        #[source]
        source: BlobError,
    },

    #[error("Failed to delete file {path}: {source}")]
    StorageDelete {
        path: String,
        #[source]
        source: BlobError,
    },

    #[error("Failed to marshal file {path}: {source}")]
    Serialization {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to unmarshal file {path}: {source}")]
    Deserialization {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Codec,
    Configuration,
    System,
}

impl StoreError {
    /// Object path the failed operation was addressing, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            StoreError::StorageWrite { path, .. }
            | StoreError::StorageRead { path, .. }
            | StoreError::StorageDelete { path, .. }
            | StoreError::Serialization { path, .. }
            | StoreError::Deserialization { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            StoreError::StorageWrite { .. }
            | StoreError::StorageRead { .. }
            | StoreError::StorageDelete { .. } => ErrorCategory::Storage,
            StoreError::Serialization { .. } | StoreError::Deserialization { .. } => {
                ErrorCategory::Codec
            }
            StoreError::ConfigError { .. }
            | StoreError::MissingConfigError { .. }
            | StoreError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            StoreError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StoreError::StorageRead { path, source } if source.is_not_found() => {
                format!("No object stored at '{}'", path)
            }
            StoreError::StorageWrite { path, .. } => {
                format!("Could not write '{}' to the object store", path)
            }
            StoreError::StorageRead { path, .. } => {
                format!("Could not read '{}' from the object store", path)
            }
            StoreError::StorageDelete { path, .. } => {
                format!("Could not delete '{}' from the object store", path)
            }
            StoreError::Serialization { path, .. } => {
                format!("Value for '{}' cannot be encoded as YAML", path)
            }
            StoreError::Deserialization { path, .. } => {
                format!("Content of '{}' is not valid YAML for the requested type", path)
            }
            StoreError::MissingConfigError { field } => {
                format!("Please provide a value for '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn storage_errors_keep_path_and_source() {
        let err = StoreError::StorageRead {
            path: "pipelines/abc".to_string(),
            source: BlobError::NotFound {
                bucket: "mlpipeline".to_string(),
                key: "pipelines/abc".to_string(),
            },
        };

        assert_eq!(err.path(), Some("pipelines/abc"));
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(err.to_string().contains("Failed to get file pipelines/abc"));

        let source = err.source().expect("source should be chained");
        assert!(source.to_string().contains("mlpipeline/pipelines/abc"));
        assert_eq!(err.user_friendly_message(), "No object stored at 'pipelines/abc'");
    }

    #[test]
    fn config_errors_have_no_path() {
        let err = StoreError::MissingConfigError {
            field: "OBJECT_STORE_BUCKET".to_string(),
        };
        assert_eq!(err.path(), None);
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }
}
