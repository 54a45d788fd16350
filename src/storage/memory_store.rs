use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::models::TransactionRecord;
use crate::storage::{StoreError, TransactionStore};

/// In-process store keeping each committed batch as a single entry, so a batch is
/// visible either completely or not at all.
pub struct MemoryStore {
    batches: DashMap<u64, Vec<TransactionRecord>>,
    next_batch_id: AtomicU64
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            batches: DashMap::new(),
            next_batch_id: AtomicU64::new(0)
        }
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub fn record_count(&self) -> usize {
        self.batches.iter().map(|batch| batch.value().len()).sum()
    }

    /// Every stored record in commit order.
    pub fn records(&self) -> Vec<TransactionRecord> {
        let mut batches: Vec<(u64, Vec<TransactionRecord>)> = self.batches.iter()
            .map(|batch| (*batch.key(), batch.value().clone()))
            .collect();

        batches.sort_by_key(|(batch_id, _)| *batch_id);
        batches.into_iter().flat_map(|(_, records)| records).collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStore for MemoryStore {
    async fn bulk_insert(&self, records: Vec<TransactionRecord>) -> Result<(), StoreError> {
        let batch_id = self.next_batch_id.fetch_add(1, Ordering::SeqCst);
        self.batches.insert(batch_id, records);

        Ok(())
    }
}
