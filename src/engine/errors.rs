use std::collections::BTreeSet;

use thiserror::Error;

use crate::ingest::ReadError;
use crate::schema::SchemaError;
use crate::storage::StoreError;

/// Why a whole chunk was skipped before any record was built.
#[derive(Debug, Error)]
pub enum ChunkRejection {
    #[error(transparent)]
    UnknownSchema(#[from] SchemaError),
    #[error("Missing expected columns: {missing:?} for bank [{bank}], type [{transaction_type}]")]
    MissingHeaders {
        bank: String,
        transaction_type: String,
        missing: BTreeSet<String>
    }
}

/// Why a single row was left out of its batch.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("Unexpected transaction type [{transaction_type}] for row [{row}]")]
    InvalidTransactionType {
        row: usize,
        transaction_type: String
    },
    #[error("No bank ID found for bank [{bank}], row [{row}] has no MID")]
    UnknownBankCode {
        row: usize,
        bank: String
    }
}

/// Ingestion-level faults. These abort the job and are retried by the job runner.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Job lists {files} files but {formats} format tags")]
    FormatCountMismatch {
        files: usize,
        formats: usize
    },
    #[error("Could not read file [{file}]: {source}")]
    Read {
        file: String,
        #[source]
        source: ReadError
    },
    #[error(transparent)]
    Store(#[from] StoreError)
}
