use std::time::Duration;

pub const DEFAULT_CHUNK_SIZE: usize = 50_000;
pub const DEFAULT_RESULT_TTL: Duration = Duration::from_secs(3600);
pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Whole-job retry behaviour for ingestion-level faults.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Attempts made after the first one.
    pub max_retries: u32,
    /// Fixed pause between attempts.
    pub delay: Duration
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: DEFAULT_RETRY_DELAY
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Rows per CSV chunk. Workbooks are always a single chunk.
    pub chunk_size: usize,
    /// Lifetime of the published batch result.
    pub result_ttl: Duration,
    pub retry: RetryPolicy
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            result_ttl: DEFAULT_RESULT_TTL,
            retry: RetryPolicy::default()
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_result_ttl(mut self, result_ttl: Duration) -> Self {
        self.result_ttl = result_ttl;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}
