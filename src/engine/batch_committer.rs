use std::sync::Arc;

use tracing::{debug, error};

use crate::models::TransactionRecord;
use crate::storage::{StoreError, TransactionStore};

/// Counts produced by one atomic commit.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct CommitOutcome {
    pub committed: usize,
    pub failed: usize
}

/// Hands a whole batch to the store as one unit of work.
pub struct BatchCommitter<S> {
    store: Arc<S>
}

impl<S: TransactionStore> BatchCommitter<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Commits `records` atomically.
    ///
    /// A rejected batch counts every record as failed, individually valid rows included.
    ///
    /// # Errors
    /// `StoreError::Unavailable` is returned untouched so the job can be retried.
    pub async fn commit(&self, records: Vec<TransactionRecord>) -> Result<CommitOutcome, StoreError> {
        let attempted = records.len();

        if attempted == 0 {
            return Ok(CommitOutcome::default());
        }

        match self.store.bulk_insert(records).await {
            Ok(()) => {
                debug!("Committed batch of {attempted} transactions");
                Ok(CommitOutcome { committed: attempted, failed: 0 })
            }
            Err(StoreError::Rejected(reason)) => {
                error!("Transaction failed, {attempted} records rolled back: {reason}");
                Ok(CommitOutcome { committed: 0, failed: attempted })
            }
            Err(error) => Err(error)
        }
    }
}
