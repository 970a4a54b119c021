use crate::config::StoreConfig;
use crate::utils::error::{Result, StoreError};
use crate::utils::validation::Validate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

lazy_static! {
    static ref ENV_REFERENCE: Regex = Regex::new(r"\$\{([^}]+)\}").expect("env reference pattern is valid");
}

/// On-disk configuration file.
///
/// ```toml
/// [store]
/// bucket_name = "mlpipeline"
/// base_folder = "pipelines"
/// disable_multipart = true
///
/// [store.backend]
/// type = "s3"
/// endpoint = "http://minio-service:9000"
/// access_key = "${MINIO_ACCESS_KEY}"
/// secret_key = "${MINIO_SECRET_KEY}"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: StoreConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    /// `compact` (default) or `json`
    pub format: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StoreError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let config: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| StoreError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces `${VAR}` references with environment values; unknown variables are kept verbatim.
    fn substitute_env_vars(content: &str) -> String {
        ENV_REFERENCE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .is_some_and(|format| format.eq_ignore_ascii_case("json"))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.store.validate()?;

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            if !["compact", "json"].contains(&format.to_ascii_lowercase().as_str()) {
                return Err(StoreError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: "Expected `compact` or `json`".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Backend;

    #[test]
    fn test_parse_minimal_config() {
        let config = TomlConfig::from_toml_str(
            r#"
            [store]
            bucket_name = "mlpipeline"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.bucket_name, "mlpipeline");
        assert_eq!(config.store.base_folder, "pipelines");
        assert!(config.store.disable_multipart);
        assert!(matches!(config.store.backend, Backend::Local { .. }));
        assert!(!config.json_logging());
    }

    #[test]
    fn test_parse_s3_backend() {
        let config = TomlConfig::from_toml_str(
            r#"
            [store]
            bucket_name = "mlpipeline"
            base_folder = ""
            disable_multipart = false

            [store.backend]
            type = "s3"
            endpoint = "http://minio-service:9000"
            access_key = "minio"
            secret_key = "minio123"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.base_folder, "");
        assert!(!config.store.disable_multipart);
        match &config.store.backend {
            Backend::S3(settings) => {
                assert_eq!(settings.endpoint.as_deref(), Some("http://minio-service:9000"));
                assert_eq!(settings.region, "us-east-1");
            }
            other => panic!("unexpected backend {:?}", other),
        }
        assert!(config.json_logging());
    }

    #[test]
    fn test_unknown_env_reference_is_kept() {
        let content = "secret = \"${PIPELINE_STORE_SURELY_UNSET_VAR}\"";
        assert_eq!(TomlConfig::substitute_env_vars(content), content);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(TomlConfig::from_toml_str("[store]\nbucket_name = \"UPPER\"").is_err());
        assert!(TomlConfig::from_toml_str("not toml at all [").is_err());
        assert!(TomlConfig::from_toml_str(
            "[store]\nbucket_name = \"mlpipeline\"\n[logging]\nformat = \"xml\""
        )
        .is_err());
    }
}
