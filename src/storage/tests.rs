use super::{MemoryStore, ResultCache, TransactionStore};
use crate::models::{BatchResult, TransactionRecord};
use crate::types::TransactionType;
use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;

fn create_record(order_id: &str) -> TransactionRecord {
    let mut record = TransactionRecord::new(TransactionType::Booking, "karur_vysya", "merchant");
    record.order_id = Some(order_id.to_string());
    record
}

#[tokio::test]
async fn test_memory_store_keeps_batches_in_commit_order() -> Result<()> {
    let store = MemoryStore::new();

    store.bulk_insert(vec![create_record("1"), create_record("2")]).await?;
    store.bulk_insert(vec![create_record("3")]).await?;

    let order_ids: Vec<Option<String>> = store.records().into_iter().map(|record| record.order_id).collect();

    assert_eq!(store.batch_count(), 2);
    assert_eq!(store.record_count(), 3);
    assert_eq!(order_ids, vec![Some("1".to_string()), Some("2".to_string()), Some("3".to_string())]);

    Ok(())
}

#[tokio::test]
async fn test_result_cache_defaults_to_zero_counts() {
    let cache = ResultCache::new(Duration::from_secs(3600));

    assert_eq!(cache.latest().await, BatchResult::new(0, 0));
}

#[tokio::test]
async fn test_result_cache_is_last_write_wins() {
    let cache = ResultCache::new(Duration::from_secs(3600));

    cache.publish(BatchResult::new(3, 0)).await;
    cache.publish(BatchResult::new(0, 5)).await;

    assert_eq!(cache.latest().await, BatchResult::new(0, 5));
}

#[tokio::test]
async fn test_result_cache_expires_after_time_to_live() {
    let cache = ResultCache::new(Duration::from_millis(100));

    cache.publish(BatchResult::new(7, 1)).await;
    assert_eq!(cache.latest().await, BatchResult::new(7, 1));

    sleep(Duration::from_millis(200)).await;

    assert_eq!(cache.latest().await, BatchResult::default());
}
