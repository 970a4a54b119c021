use pipeline_store::{Backend, StoreConfig, StoreError, TomlConfig};
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

const VARS: [&str; 9] = [
    "OBJECT_STORE_BUCKET",
    "OBJECT_STORE_BASE_FOLDER",
    "OBJECT_STORE_DISABLE_MULTIPART",
    "OBJECT_STORE_BACKEND",
    "OBJECT_STORE_LOCAL_ROOT",
    "OBJECT_STORE_ENDPOINT",
    "OBJECT_STORE_REGION",
    "OBJECT_STORE_ACCESS_KEY",
    "OBJECT_STORE_SECRET_KEY",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

// Environment is process-wide, so every env case lives in this one test.
#[test]
fn test_store_config_from_env() {
    clear_env();
    assert!(matches!(
        StoreConfig::from_env(),
        Err(StoreError::MissingConfigError { ref field }) if field == "OBJECT_STORE_BUCKET"
    ));

    env::set_var("OBJECT_STORE_BUCKET", "mlpipeline");
    let config = StoreConfig::from_env().unwrap();
    assert_eq!(config.base_folder, "pipelines");
    assert!(config.disable_multipart);
    assert_eq!(config.backend.name(), "local");

    env::set_var("OBJECT_STORE_BASE_FOLDER", "");
    env::set_var("OBJECT_STORE_DISABLE_MULTIPART", "false");
    env::set_var("OBJECT_STORE_BACKEND", "s3");
    env::set_var("OBJECT_STORE_ENDPOINT", "http://minio-service:9000");
    env::set_var("OBJECT_STORE_ACCESS_KEY", "minio");
    env::set_var("OBJECT_STORE_SECRET_KEY", "minio123");
    let config = StoreConfig::from_env().unwrap();
    assert_eq!(config.base_folder, "");
    assert!(!config.disable_multipart);
    match config.backend {
        Backend::S3(settings) => {
            assert_eq!(settings.endpoint.as_deref(), Some("http://minio-service:9000"));
            assert_eq!(settings.region, "us-east-1");
            assert_eq!(settings.access_key.as_deref(), Some("minio"));
        }
        other => panic!("unexpected backend {:?}", other),
    }

    env::set_var("OBJECT_STORE_BACKEND", "gcs");
    assert!(matches!(
        StoreConfig::from_env(),
        Err(StoreError::InvalidConfigValueError { .. })
    ));

    env::set_var("OBJECT_STORE_BACKEND", "memory");
    env::set_var("OBJECT_STORE_DISABLE_MULTIPART", "perhaps");
    assert!(StoreConfig::from_env().is_err());

    // ${VAR} references in a config file resolve against the same environment
    env::set_var("OBJECT_STORE_ACCESS_KEY", "from-env");
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[store]
bucket_name = "mlpipeline"

[store.backend]
type = "s3"
endpoint = "http://minio-service:9000"
access_key = "${{OBJECT_STORE_ACCESS_KEY}}"
secret_key = "${{OBJECT_STORE_SECRET_KEY}}"
"#
    )
    .unwrap();

    let config = TomlConfig::from_file(file.path()).unwrap();
    match config.store.backend {
        Backend::S3(settings) => {
            assert_eq!(settings.access_key.as_deref(), Some("from-env"));
            assert_eq!(settings.secret_key.as_deref(), Some("minio123"));
        }
        other => panic!("unexpected backend {:?}", other),
    }

    clear_env();
}

#[test]
fn test_missing_config_file_is_io_error() {
    let err = TomlConfig::from_file("/nonexistent/pipeline-store.toml").unwrap_err();
    assert!(matches!(err, StoreError::IoError(_)));
}
