use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::models::BatchResult;

const LATEST_RESULT_KEY: &str = "latest_transaction_results";

/// Single overwritable slot holding the most recent chunk result.
///
/// Writes are last-write-wins, concurrent jobs overwrite each other rather than aggregate.
#[derive(Clone)]
pub struct ResultCache {
    cache: Cache<&'static str, BatchResult>
}

impl ResultCache {
    pub fn new(time_to_live: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .time_to_live(time_to_live)
                .build()
        }
    }

    pub async fn publish(&self, result: BatchResult) {
        debug!("Publishing batch result: {result:?}");
        self.cache.insert(LATEST_RESULT_KEY, result).await;
    }

    /// The last published result, or zero counts once it is absent or expired.
    pub async fn latest(&self) -> BatchResult {
        self.cache.get(&LATEST_RESULT_KEY).await.unwrap_or_default()
    }
}
