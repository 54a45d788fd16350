mod engine;
mod ingest;
mod jobs;
mod models;
mod schema;
mod storage;
mod types;

use std::io::{stderr, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Parser;
use tempfile::TempDir;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::{IngestJob, IngestionEngine, PipelineConfig, RetryPolicy};
use crate::ingest::stage_upload;
use crate::jobs::JobRunner;
use crate::schema::BankSchemaRegistry;
use crate::storage::{MemoryStore, ResultCache};

/// Reconciles bank settlement reports into canonical transaction records.
///
/// Committed records are written to stdout as CSV, logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "settlement-recon", version)]
struct Args {
    /// Settlement report files (.csv, .xlsx, .xls, .ods)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Bank that issued the reports, e.g. icici or karur_vysya
    #[arg(long, env = "RECON_BANK")]
    bank: String,

    /// booking, refund or both
    #[arg(long, env = "RECON_TRANSACTION_TYPE")]
    transaction_type: String,

    /// Merchant the reports belong to
    #[arg(long, env = "RECON_MERCHANT")]
    merchant: String,

    /// Rows per CSV chunk
    #[arg(long, env = "RECON_CHUNK_SIZE", default_value_t = engine::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Extra attempts after an ingestion-level failure
    #[arg(long, env = "RECON_MAX_RETRIES", default_value_t = engine::DEFAULT_MAX_RETRIES)]
    max_retries: u32,

    /// Seconds to wait between attempts
    #[arg(long, env = "RECON_RETRY_DELAY_SECS", default_value_t = engine::DEFAULT_RETRY_DELAY.as_secs())]
    retry_delay_secs: u64,

    /// Seconds the latest batch result stays readable
    #[arg(long, env = "RECON_RESULT_TTL_SECS", default_value_t = engine::DEFAULT_RESULT_TTL.as_secs())]
    result_ttl_secs: u64,

    /// error, warn, info, debug or trace
    #[arg(long, env = "RECON_LOG_LEVEL", default_value = "info")]
    log_level: String
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(parse_log_level(&args.log_level));

    let config = PipelineConfig::new()
        .with_chunk_size(args.chunk_size)
        .with_result_ttl(Duration::from_secs(args.result_ttl_secs))
        .with_retry_policy(RetryPolicy {
            max_retries: args.max_retries,
            delay: Duration::from_secs(args.retry_delay_secs)
        });

    //NOTE: The engine deletes each file once processed, so it only ever sees staged copies
    let staging = TempDir::new()?;
    let mut job = IngestJob {
        files: Vec::with_capacity(args.files.len()),
        formats: Vec::with_capacity(args.files.len()),
        bank: args.bank,
        transaction_type: args.transaction_type,
        merchant: args.merchant
    };

    for file in &args.files {
        match stage_upload(file, staging.path()) {
            Ok(upload) => {
                job.files.push(upload.path);
                job.formats.push(upload.format.to_string());
            }
            Err(error) => error!("Skipping upload {}: {error}", file.display())
        }
    }

    if job.files.is_empty() {
        bail!("No valid files were uploaded");
    }

    let store = Arc::new(MemoryStore::new());
    let results = ResultCache::new(config.result_ttl);
    let registry = Arc::new(BankSchemaRegistry::builtin());
    let engine = Arc::new(IngestionEngine::new(store.clone(), results.clone(), registry, &config));
    let runner = JobRunner::new(engine, config.retry);

    info!("Files uploaded successfully. Processing started.");

    let timer = Instant::now();
    runner.submit(job).await??;
    let duration = timer.elapsed();

    let latest = results.latest().await;

    info!(
        "Processed files in: {duration:?}. Total successful: {}, total failed: {}",
        latest.total_successful, latest.total_failed
    );
    info!("Committed {} records in {} batches", store.record_count(), store.batch_count());

    write_records_to_stdout(&store)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the record export, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_records_to_stdout(store: &MemoryStore) -> Result<()> {
    let mut writer = csv::Writer::from_writer(stdout().lock());

    for record in store.records() {
        writer.serialize(record)?;
    }

    writer.flush()?;

    Ok(())
}
