use serde::Serialize;

/// Success and failure counts for one processed chunk.
///
/// `total_successful` counts rows that were materialized, a failed commit moves the whole
/// batch into `total_failed` instead.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct BatchResult {
    pub total_successful: usize,
    pub total_failed: usize
}

impl BatchResult {
    pub fn new(total_successful: usize, total_failed: usize) -> Self {
        Self { total_successful, total_failed }
    }
}
