//! inflow CLI — drives the ingestion and extraction stages.
//!
//! Set DATABASE_URL (or point DATABASE_URL_VAR at another variable holding
//! the connection string) and STORAGE_BACKEND/S3_REGION or
//! LOCAL_STORAGE_PATH. The schema itself is a precondition; `inflow
//! migrate` applies it as a one-off operational step.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use inflow_cli::init_tracing;
use inflow_core::models::ObjectNotification;
use inflow_core::Config;
use inflow_db::{ConnectionCache, ContentUploadRepository, EnvCredentialResolver};
use inflow_pipeline::{ExtractStage, IngestStage};
use inflow_storage::create_object_source;

#[derive(Parser)]
#[command(name = "inflow", about = "Content ingestion and metadata extraction pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a batch of object notifications from a JSON file
    Ingest {
        /// Path to a JSON array of `{container, key, eventTimestamp}` objects
        events: PathBuf,
    },
    /// Run one extraction batch over unprocessed rows
    Extract,
    /// Poll the extraction stage on an interval until interrupted
    Run {
        /// Seconds between extraction batches (defaults to EXTRACT_POLL_INTERVAL_SECS)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Apply the content_uploads schema
    Migrate,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize report")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    let cli = Cli::parse();

    let resolver = Arc::new(EnvCredentialResolver::new(config.database_url_var.clone()));
    let connections = Arc::new(ConnectionCache::new(
        resolver,
        config.db_max_connections,
        config.db_timeout_seconds,
    ));
    let store = Arc::new(ContentUploadRepository::new(connections.clone()));

    match cli.command {
        Commands::Ingest { events } => {
            let raw = tokio::fs::read_to_string(&events)
                .await
                .with_context(|| format!("Failed to read {}", events.display()))?;
            let notifications: Vec<ObjectNotification> =
                serde_json::from_str(&raw).context("Failed to parse notification batch")?;

            let objects = create_object_source(&config)
                .await
                .context("Failed to create object source")?;
            let stage = IngestStage::new(store, objects);
            let report = stage.ingest(&notifications).await?;
            print_json(&report)?;
        }
        Commands::Extract => {
            let stage = ExtractStage::new(store);
            let report = stage.run().await?;
            print_json(&report)?;
        }
        Commands::Run { interval } => {
            let secs = interval.unwrap_or(config.extract_poll_interval_secs);
            let stage = ExtractStage::new(store);

            tracing::info!(interval_secs = secs, "Extraction poll loop started");
            let mut ticker = tokio::time::interval(Duration::from_secs(secs));
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Extraction poll loop shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        match stage.run().await {
                            Ok(report) if report.processed > 0 => {
                                tracing::info!(processed = report.processed, "Extraction batch completed");
                            }
                            Ok(_) => {}
                            Err(e) => {
                                // The loop is the external trigger here; the
                                // next tick is its retry policy.
                                tracing::error!(
                                    error = %e,
                                    code = e.error_code(),
                                    retryable = e.is_retryable(),
                                    "Extraction batch failed"
                                );
                            }
                        }
                    }
                }
            }
        }
        Commands::Migrate => {
            let pool = connections.acquire().await?;
            sqlx::migrate!("../../migrations")
                .run(&pool)
                .await
                .context("Failed to apply migrations")?;
            tracing::info!("Schema migrations applied");
        }
    }

    Ok(())
}
