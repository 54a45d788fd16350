mod batch_committer;
mod chunk_processor;
mod config;
mod errors;
mod ingestion_engine;
mod materializer;

pub use config::{PipelineConfig, RetryPolicy, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_RETRIES, DEFAULT_RESULT_TTL, DEFAULT_RETRY_DELAY};
pub use errors::PipelineError;
pub use ingestion_engine::{IngestJob, IngestionEngine};
