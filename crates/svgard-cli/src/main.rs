//! svgard CLI: ingest, serve and inspect SVG documents against the configured store.
//!
//! Reads configuration from the environment (and `.env`): STORAGE_BACKEND,
//! LOCAL_STORAGE_PATH, MAX_SVG_SIZE_BYTES, LOG_FORMAT.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use svgard_cli::{filename_of, init_tracing, parse_tags, resolve_hash};
use svgard_core::constants::SVG_MIME_TYPE;
use svgard_core::{AppError, Config, ErrorMetadata, StoredImageRecord, UploadedAsset};
use svgard_processing::{
    sanitize, validate, HandlerRegistry, ImageCatalog, ImageId, MemoryCatalog, SvgHandler,
    UploadGuard, UploadHandler,
};
use svgard_storage::create_storage;

#[derive(Parser)]
#[command(name = "svgard", about = "SVG ingestion and sanitization")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate, sanitize and store one or more SVG files
    Ingest {
        /// Files to ingest
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Whitespace-separated tags (may be repeated)
        #[arg(long)]
        tags: Vec<String>,
        /// Source attribution
        #[arg(long)]
        source: Option<String>,
        /// Store under this hash instead of the SHA-256 of the content
        #[arg(long)]
        hash: Option<String>,
    },
    /// Write the sanitized stored document for a hash to stdout
    Serve {
        /// Content hash
        hash: String,
    },
    /// Sanitize a file and write the result to stdout without storing it
    Sanitize {
        /// Path to the SVG file
        file: PathBuf,
    },
    /// Print structural validation results for a file
    Inspect {
        /// Path to the SVG file
        file: PathBuf,
    },
}

#[derive(Serialize)]
#[serde(untagged)]
enum IngestOutcome {
    Stored {
        file: String,
        id: Option<ImageId>,
        record: StoredImageRecord,
    },
    Failed {
        file: String,
        error: &'static str,
        message: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn write_document(bytes: &[u8]) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(bytes).context("Write document")?;
    stdout.flush().context("Flush stdout")?;
    Ok(())
}

async fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Invalid configuration")?;
    init_tracing(config.log_format);

    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            files,
            tags,
            source,
            hash,
        } => {
            if hash.is_some() && files.len() > 1 {
                return Err(AppError::InvalidInput(
                    "--hash can only be used with a single file".to_string(),
                )
                .into());
            }

            let storage = create_storage(&config).await?;
            let catalog = Arc::new(MemoryCatalog::new());
            let handler = Arc::new(SvgHandler::new(storage).with_catalog(catalog.clone()));
            let registry =
                HandlerRegistry::new(UploadGuard::from_config(&config)).with_handler(handler);
            let tags = parse_tags(&tags);

            let mut outcomes = Vec::with_capacity(files.len());
            for path in &files {
                let data = read_file(path).await?;
                let hash = resolve_hash(hash.as_deref(), &data)?;
                let mut asset = UploadedAsset::new(data, hash, filename_of(path), SVG_MIME_TYPE)
                    .with_tags(tags.clone());
                if let Some(source) = &source {
                    asset = asset.with_source(source.clone());
                }

                let file = path.display().to_string();
                let outcome = match registry.ingest(asset).await {
                    Ok(record) => IngestOutcome::Stored {
                        file,
                        id: catalog.id_for(&record.hash).await,
                        record,
                    },
                    Err(e) => {
                        let err = AppError::from(e);
                        tracing::warn!(file = %file, error = %err.detailed_message(), "Ingest failed");
                        IngestOutcome::Failed {
                            file,
                            error: err.error_code(),
                            message: err.client_message(),
                        }
                    }
                };
                outcomes.push(outcome);
            }

            print_json(&outcomes)?;
            let failed = outcomes
                .iter()
                .filter(|o| matches!(o, IngestOutcome::Failed { .. }))
                .count();
            if failed > 0 {
                anyhow::bail!("{} of {} uploads failed", failed, outcomes.len());
            }
        }
        Commands::Serve { hash } => {
            let storage = create_storage(&config).await?;
            let handler = SvgHandler::new(storage);
            let document = handler.serve(&hash).await.map_err(AppError::from)?;
            write_document(document.body.as_bytes())?;
        }
        Commands::Sanitize { file } => {
            let data = read_file(&file).await?;
            let document = tokio::task::spawn_blocking(move || sanitize(&data)).await?;
            write_document(document.as_bytes())?;
        }
        Commands::Inspect { file } => {
            let data = read_file(&file).await?;
            match validate(&data) {
                Ok(metadata) => print_json(&metadata)?,
                Err(e) => {
                    print_json(&serde_json::json!({
                        "valid": false,
                        "reason": e.reason,
                        "position": e.position,
                    }))?;
                    anyhow::bail!(e);
                }
            }
        }
    }

    Ok(())
}
