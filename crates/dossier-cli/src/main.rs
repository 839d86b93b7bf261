//! Dossier CLI: upload files straight to object storage.
//!
//! Set DOSSIER_API_KEY and DOSSIER_API_URL (or API_URL). Uses X-API-Key auth.

use anyhow::Context;
use bytes::Bytes;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

use dossier_api_client::ApiClient;
use dossier_cli::{content_type_for_path, init_tracing};
use dossier_core::models::{BatchFile, FileDescriptor};
use dossier_core::UploadConfig;
use dossier_upload::{DocumentDeleter, HttpTransferExecutor, UploadCoordinator};

#[derive(Parser)]
#[command(name = "dossier", about = "Dossier direct-upload CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload one or more files as a single batch
    Upload {
        /// Paths of the files to upload
        #[arg(required = true)]
        files: Vec<std::path::PathBuf>,
        /// Override the number of simultaneous transfers
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Delete an uploaded document by its id
    Delete {
        /// Document id returned in the upload outcome
        document_id: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload { files, concurrency } => {
            let config = UploadConfig::from_env().context("Failed to load upload configuration")?;
            let client = Arc::new(ApiClient::from_env().context(
                "Failed to create API client. Set DOSSIER_API_KEY and DOSSIER_API_URL (or API_URL)",
            )?);
            let executor = Arc::new(
                HttpTransferExecutor::from_config(&config)
                    .context("Failed to create transfer executor")?,
            );

            let mut batch = Vec::with_capacity(files.len());
            for path in &files {
                let data = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("Failed to read file: {}", path.display()))?;
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("file.bin");

                let descriptor =
                    FileDescriptor::new(name, content_type_for_path(path), data.len() as u64);
                descriptor
                    .validate()
                    .with_context(|| format!("Invalid file: {}", path.display()))?;

                batch.push(BatchFile::new(descriptor, Bytes::from(data)));
            }

            let coordinator = UploadCoordinator::new(
                client,
                executor,
                concurrency.unwrap_or(config.max_concurrent_transfers),
            );

            let outcome = coordinator.submit_batch(batch).await?;
            print_json(&outcome.outcomes)?;

            if !outcome.overall_success {
                anyhow::bail!("One or more files failed to upload");
            }
        }
        Commands::Delete { document_id } => {
            let client = ApiClient::from_env().context(
                "Failed to create API client. Set DOSSIER_API_KEY and DOSSIER_API_URL (or API_URL)",
            )?;
            client.delete_document(&document_id).await?;
            print_json(&serde_json::json!({
                "success": true,
                "message": format!("Document {} deleted", document_id)
            }))?;
        }
    }

    Ok(())
}
