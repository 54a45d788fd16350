mod errors;
mod memory_store;
mod result_cache;
#[cfg(test)]
mod tests;

use std::future::Future;

use crate::models::TransactionRecord;

pub use errors::StoreError;
pub use memory_store::MemoryStore;
pub use result_cache::ResultCache;

/// Persistent destination of materialized transactions.
pub trait TransactionStore: Send + Sync + 'static {
    /// Inserts `records` as one transaction: either every record is stored or none is.
    fn bulk_insert(&self, records: Vec<TransactionRecord>) -> impl Future<Output = Result<(), StoreError>> + Send;
}
