use std::sync::Arc;

use tokio::spawn;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::engine::{IngestJob, IngestionEngine, RetryPolicy};
use crate::jobs::JobError;
use crate::storage::TransactionStore;

/// Background executor for ingestion jobs.
///
/// Data-quality problems never reach this level. Only ingestion-level faults trigger a retry,
/// and a retry re-runs the whole job.
pub struct JobRunner<S> {
    engine: Arc<IngestionEngine<S>>,
    policy: RetryPolicy
}

impl<S: TransactionStore> JobRunner<S> {
    pub fn new(engine: Arc<IngestionEngine<S>>, policy: RetryPolicy) -> Self {
        Self { engine, policy }
    }

    /// Spawns the job and returns a handle resolving once it succeeded or ran out of attempts.
    pub fn submit(&self, job: IngestJob) -> JoinHandle<Result<(), JobError>> {
        let engine = self.engine.clone();
        let policy = self.policy;

        spawn(async move {
            let mut attempt: u32 = 0;

            loop {
                attempt += 1;

                match engine.run(&job).await {
                    Ok(()) => {
                        info!("Ingestion job for bank [{}] finished after {attempt} attempt(s)", job.bank);
                        return Ok(());
                    }
                    Err(error) if attempt <= policy.max_retries => {
                        warn!("Ingestion attempt {attempt} failed: {error}. Retrying in {:?}", policy.delay);
                        sleep(policy.delay).await;
                    }
                    Err(error) => {
                        error!("Ingestion job for bank [{}] failed permanently: {error}", job.bank);
                        return Err(JobError::RetriesExhausted { attempts: attempt, source: error });
                    }
                }
            }
        })
    }
}
