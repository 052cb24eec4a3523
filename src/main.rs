mod cli;
mod lambda;

use thumbforge::store::{LocalStore, ObjectStore, S3Store};
use thumbforge::{config, ImageResizeHandler, NotificationBatch};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Lambda);

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "thumbforge=debug,thumbforge_common=debug".to_string()
        } else {
            "thumbforge=info".to_string()
        }
    });

    if matches!(command, Commands::Lambda) {
        // CloudWatch stamps every line already
        tracing_subscriber::fmt()
            .with_env_filter(&env_filter)
            .with_target(false)
            .without_time()
            .init();
    } else {
        // stdout carries command output only
        tracing_subscriber::fmt()
            .with_env_filter(&env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    match command {
        Commands::Lambda => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(lambda::run(cli.config.as_deref()))
        }
        Commands::Run { event, s3 } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_event(&event, cli.config.as_deref(), s3))
        }
        Commands::Validate => validate_config(cli.config.as_deref()),
        Commands::Version => {
            println!("thumbforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn run_event(event_path: &Path, config_path: Option<&Path>, use_s3: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let content = std::fs::read_to_string(event_path)
        .with_context(|| format!("Failed to read event file: {:?}", event_path))?;
    let batch: NotificationBatch = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse event file: {:?}", event_path))?;

    let store: Arc<dyn ObjectStore> = if use_s3 {
        Arc::new(S3Store::from_env().await)
    } else {
        let local = LocalStore::new(config.local.root.clone());
        tracing::info!("Using local buckets under {:?}", local.root());
        Arc::new(local)
    };

    let handler = ImageResizeHandler::from_config(&config.buckets, store.clone(), store);
    let response = handler
        .handle(&batch)
        .await
        .with_context(|| format!("Failed to process {:?}", event_path))?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn validate_config(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    println!("Configuration is valid.");
    println!();
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
