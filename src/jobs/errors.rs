use thiserror::Error;

use crate::engine::PipelineError;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Ingestion job failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: PipelineError
    }
}
