use anyhow::Context;
use clap::Parser;
use pipeline_store::config::cli::{CliConfig, Commands};
use pipeline_store::utils::error::{ErrorCategory, StoreError};
use pipeline_store::utils::logger;
use pipeline_store::{MinioObjectStore, ObjectStore};
use std::io::Write;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let resolved = match cli.resolve() {
        Ok(resolved) => resolved,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };

    if resolved.json_logging {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("Resolved config: {:?}", resolved.store);

    if let Err(e) = run(&cli, &resolved.store).await {
        tracing::error!("❌ {:#}", e);
        match e.downcast_ref::<StoreError>() {
            Some(store_error) => {
                eprintln!("❌ {}", store_error.user_friendly_message());
                std::process::exit(exit_code(store_error));
            }
            None => {
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn exit_code(e: &StoreError) -> i32 {
    match e.category() {
        ErrorCategory::Storage => 1,
        ErrorCategory::Codec => 2,
        ErrorCategory::Configuration => 3,
        ErrorCategory::System => 4,
    }
}

async fn run(cli: &CliConfig, config: &pipeline_store::StoreConfig) -> anyhow::Result<()> {
    let client = config.connect().await?;
    let store = MinioObjectStore::from_config(client, config);

    match &cli.command {
        Commands::Key { pipeline_id } => {
            println!("{}", store.get_pipeline_key(pipeline_id));
        }
        Commands::Put { path, file } => {
            let content = tokio::fs::read(file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            store.add_file(&content, path).await?;
            tracing::info!("✅ Stored {} bytes at {}", content.len(), path);
        }
        Commands::Get { path, output } => {
            let content = store.get_file(path).await?;
            match output {
                Some(output) => {
                    tokio::fs::write(output, &content)
                        .await
                        .with_context(|| format!("writing {}", output.display()))?;
                    tracing::info!("📁 Saved {} to {}", path, output.display());
                }
                None => std::io::stdout().write_all(&content)?,
            }
        }
        Commands::Delete { path } => {
            store.delete_file(path).await?;
            tracing::info!("🗑️ Deleted {}", path);
        }
        Commands::PutYaml { path, file } => {
            let text = tokio::fs::read_to_string(file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let document: serde_yaml::Value = serde_yaml::from_str(&text)
                .with_context(|| format!("{} is not valid YAML", file.display()))?;
            store.add_as_yaml_file(&document, path).await?;
            tracing::info!("✅ Stored YAML document at {}", path);
        }
        Commands::GetYaml { path, json } => {
            let document: serde_yaml::Value = store.get_from_yaml_file(path).await?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else {
                print!("{}", serde_yaml::to_string(&document)?);
            }
        }
    }

    Ok(())
}
