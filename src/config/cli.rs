use crate::config::toml_config::TomlConfig;
use crate::config::{Backend, S3Settings, StoreConfig, DEFAULT_LOCAL_ROOT};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "pipeline-store")]
#[command(about = "Store and fetch pipeline definitions in an S3-compatible object store")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub bucket: Option<String>,

    #[arg(long, global = true)]
    pub base_folder: Option<String>,

    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendKind>,

    #[arg(long, global = true, help = "Root directory of the local backend")]
    pub root: Option<PathBuf>,

    #[arg(long, global = true, help = "S3 endpoint, e.g. http://localhost:9000")]
    pub endpoint: Option<String>,

    #[arg(long, global = true, help = "Let the client choose multi-part uploads")]
    pub multipart: bool,

    #[arg(long, short, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    Memory,
    Local,
    S3,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Print the object key of a pipeline
    Key { pipeline_id: String },
    /// Upload a file
    Put { path: String, file: PathBuf },
    /// Download a file to stdout or to --output
    Get {
        path: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete a file
    Delete { path: String },
    /// Upload a YAML document after checking that it parses
    PutYaml { path: String, file: PathBuf },
    /// Download a YAML document and print it
    GetYaml {
        path: String,
        #[arg(long, help = "Print as JSON instead of YAML")]
        json: bool,
    },
}

/// Store configuration plus logging choices, after flags are applied.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub store: StoreConfig,
    pub json_logging: bool,
}

impl CliConfig {
    /// Merges, in increasing priority: the config file (or environment when
    /// no file is given and no --bucket is passed) and command-line flags.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let (mut store, json_logging) = match (&self.config, &self.bucket) {
            (Some(path), _) => {
                let file = TomlConfig::from_file(path)?;
                let json = file.json_logging();
                (file.store, json)
            }
            (None, Some(bucket)) => (StoreConfig::new(bucket.clone()), false),
            (None, None) => (StoreConfig::from_env()?, false),
        };

        if let Some(bucket) = &self.bucket {
            store.bucket_name = bucket.clone();
        }
        if let Some(base_folder) = &self.base_folder {
            store.base_folder = base_folder.clone();
        }
        if self.multipart {
            store.disable_multipart = false;
        }

        match self.backend {
            Some(BackendKind::Memory) => store.backend = Backend::Memory,
            Some(BackendKind::Local) => {
                store.backend = Backend::Local {
                    root: self
                        .root
                        .clone()
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCAL_ROOT)),
                }
            }
            Some(BackendKind::S3) => {
                let mut settings = match &store.backend {
                    Backend::S3(existing) => existing.clone(),
                    _ => S3Settings::default(),
                };
                if self.endpoint.is_some() {
                    settings.endpoint = self.endpoint.clone();
                }
                store.backend = Backend::S3(settings);
            }
            None => match &mut store.backend {
                Backend::Local { root } => {
                    if let Some(flag_root) = &self.root {
                        *root = flag_root.clone();
                    }
                }
                Backend::S3(settings) => {
                    if self.endpoint.is_some() {
                        settings.endpoint = self.endpoint.clone();
                    }
                }
                Backend::Memory => {}
            },
        }

        store.validate()?;
        Ok(ResolvedConfig {
            store,
            json_logging,
        })
    }
}
