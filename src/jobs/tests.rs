use super::{JobError, JobRunner};
use crate::engine::{IngestJob, IngestionEngine, PipelineConfig, PipelineError, RetryPolicy};
use crate::ingest::ReadError;
use crate::models::{BatchResult, TransactionRecord};
use crate::schema::BankSchemaRegistry;
use crate::storage::{ResultCache, StoreError, TransactionStore};

use anyhow::{bail, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::{Builder, TempDir};
use tokio::time::sleep;

/// Unavailable for the first `outages` inserts, healthy afterwards.
struct FlakyStore {
    outages: usize,
    attempts: AtomicUsize,
    stored: AtomicUsize
}

impl FlakyStore {
    fn new(outages: usize) -> Self {
        Self {
            outages,
            attempts: AtomicUsize::new(0),
            stored: AtomicUsize::new(0)
        }
    }
}

impl TransactionStore for FlakyStore {
    async fn bulk_insert(&self, records: Vec<TransactionRecord>) -> Result<(), StoreError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);

        if attempt < self.outages {
            return Err(StoreError::Unavailable(format!("outage {}", attempt + 1)));
        }

        self.stored.fetch_add(records.len(), Ordering::SeqCst);
        Ok(())
    }
}

fn quick_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        delay: Duration::from_millis(10)
    }
}

fn create_job(directory: &TempDir) -> Result<IngestJob> {
    let mut file = Builder::new().suffix(".csv").tempfile_in(directory.path())?;

    writeln!(file, "TXN DATE,IRCTC ORDER NO.,BANK BOOKING REF.NO.,BOOKING AMOUNT,CREDITED ON")?;
    writeln!(file, "2024-01-15,ORD1,REF1,10.00,2024-01-16")?;
    writeln!(file, "2024-01-15,ORD2,REF2,20.00,2024-01-16")?;
    file.flush()?;

    let (_, path) = file.keep()?;

    Ok(IngestJob {
        files: vec![path],
        formats: vec!["csv".to_string()],
        bank: "karur_vysya".to_string(),
        transaction_type: "booking".to_string(),
        merchant: "IRCTC".to_string()
    })
}

fn create_runner(store: Arc<FlakyStore>, policy: RetryPolicy) -> (JobRunner<FlakyStore>, ResultCache) {
    let config = PipelineConfig::new()
        .with_result_ttl(Duration::from_secs(60))
        .with_retry_policy(policy);
    let results = ResultCache::new(config.result_ttl);
    let engine = IngestionEngine::new(store, results.clone(), Arc::new(BankSchemaRegistry::builtin()), &config);

    (JobRunner::new(Arc::new(engine), config.retry), results)
}

#[tokio::test]
async fn test_job_succeeds_on_first_attempt() -> Result<()> {
    let directory = TempDir::new()?;
    let store = Arc::new(FlakyStore::new(0));
    let (runner, results) = create_runner(store.clone(), quick_policy(3));

    let job = create_job(&directory)?;
    let path = job.files[0].clone();

    runner.submit(job).await??;

    assert_eq!(store.attempts.load(Ordering::SeqCst), 1);
    assert_eq!(store.stored.load(Ordering::SeqCst), 2);
    assert_eq!(results.latest().await, BatchResult::new(2, 0));
    assert!(!path.exists());

    Ok(())
}

#[tokio::test]
async fn test_store_outage_is_retried_until_attempts_run_out() -> Result<()> {
    let directory = TempDir::new()?;
    let store = Arc::new(FlakyStore::new(1));
    let (runner, results) = create_runner(store.clone(), quick_policy(2));

    let job = create_job(&directory)?;
    let path = job.files[0].clone();

    //NOTE: The first attempt deletes its temporary file, every retry then fails to read it
    let Err(JobError::RetriesExhausted { attempts, source }) = runner.submit(job).await? else {
        bail!("job whose upload was consumed did not fail");
    };

    assert_eq!(attempts, 3);
    assert!(matches!(source, PipelineError::Read { source: ReadError::Io(_), .. }));
    assert_eq!(store.attempts.load(Ordering::SeqCst), 1);
    assert_eq!(store.stored.load(Ordering::SeqCst), 0);
    assert_eq!(results.latest().await, BatchResult::default());
    assert!(!path.exists());

    Ok(())
}

#[tokio::test]
async fn test_unreadable_upload_fails_the_job() -> Result<()> {
    let store = Arc::new(FlakyStore::new(0));
    let (runner, results) = create_runner(store.clone(), quick_policy(1));

    let job = IngestJob {
        files: vec![PathBuf::from("/nonexistent/upload-1.csv")],
        formats: vec!["csv".to_string()],
        bank: "karur_vysya".to_string(),
        transaction_type: "booking".to_string(),
        merchant: "IRCTC".to_string()
    };

    let Err(JobError::RetriesExhausted { attempts, source }) = runner.submit(job).await? else {
        bail!("job for a missing file succeeded");
    };

    assert_eq!(attempts, 2);
    assert!(matches!(source, PipelineError::Read { source: ReadError::Io(_), .. }));
    assert_eq!(store.attempts.load(Ordering::SeqCst), 0);
    assert_eq!(results.latest().await, BatchResult::default());

    Ok(())
}

#[tokio::test]
async fn test_retry_picks_up_file_that_became_readable() -> Result<()> {
    let directory = TempDir::new()?;
    let path = directory.path().join("late-upload.csv");
    let store = Arc::new(FlakyStore::new(0));
    let (runner, results) = create_runner(store.clone(), RetryPolicy {
        max_retries: 1,
        delay: Duration::from_millis(500)
    });

    let job = IngestJob {
        files: vec![path.clone()],
        formats: vec!["csv".to_string()],
        bank: "karur_vysya".to_string(),
        transaction_type: "booking".to_string(),
        merchant: "IRCTC".to_string()
    };

    let handle = runner.submit(job);

    sleep(Duration::from_millis(100)).await;
    fs::write(&path, "TXN DATE,IRCTC ORDER NO.,BANK BOOKING REF.NO.,BOOKING AMOUNT,CREDITED ON\n2024-01-15,ORD1,REF1,10.00,2024-01-16\n")?;

    handle.await??;

    assert_eq!(store.stored.load(Ordering::SeqCst), 1);
    assert_eq!(results.latest().await, BatchResult::new(1, 0));
    assert!(!path.exists());

    Ok(())
}

#[tokio::test]
async fn test_job_gives_up_after_max_retries() -> Result<()> {
    let directory = TempDir::new()?;
    let store = Arc::new(FlakyStore::new(usize::MAX));
    let (runner, _) = create_runner(store.clone(), quick_policy(2));

    let mut job = create_job(&directory)?;
    job.formats.push("csv".to_string());

    let Err(JobError::RetriesExhausted { attempts, source }) = runner.submit(job).await? else {
        bail!("job with misaligned formats did not fail");
    };

    assert_eq!(attempts, 3);
    assert!(matches!(source, PipelineError::FormatCountMismatch { files: 1, formats: 2 }));

    Ok(())
}

#[test]
fn test_retry_policy_defaults() {
    let config = PipelineConfig::new();

    assert_eq!(config.retry.max_retries, 5);
    assert_eq!(config.retry.delay, Duration::from_secs(60));
}
