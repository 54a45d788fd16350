use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, error, info};

use crate::engine::batch_committer::BatchCommitter;
use crate::engine::errors::{ChunkRejection, PipelineError};
use crate::engine::materializer::Materializer;
use crate::models::{BatchResult, CanonicalField, Chunk, Frame};
use crate::schema::{normalize, BankSchema, BankSchemaRegistry};
use crate::storage::{ResultCache, TransactionStore};

/// What happened to one chunk.
#[derive(Debug)]
pub enum ChunkOutcome {
    /// Records were built and committed (or the commit failed), the result was published.
    Committed(BatchResult),
    /// The chunk did not match its bank schema, nothing was built or published.
    Rejected(ChunkRejection)
}

/// Normalizes, validates, coerces and commits a single chunk.
pub struct ChunkProcessor<S> {
    registry: Arc<BankSchemaRegistry>,
    committer: BatchCommitter<S>,
    results: ResultCache
}

impl<S: TransactionStore> ChunkProcessor<S> {
    pub fn new(registry: Arc<BankSchemaRegistry>, store: Arc<S>, results: ResultCache) -> Self {
        Self {
            registry,
            committer: BatchCommitter::new(store),
            results
        }
    }

    /// Runs one chunk through the pipeline.
    ///
    /// Schema problems reject the chunk as a whole, a chunk is never partially processed at the
    /// column level. Bad cells and bad rows are logged and counted without stopping the chunk.
    ///
    /// # Errors
    /// Only store unavailability escapes as a `PipelineError`.
    pub async fn process(&self, chunk: Chunk, bank: &str, transaction_type: &str, merchant: &str) -> Result<ChunkOutcome, PipelineError> {
        info!("Processing chunk [{}] for bank: {bank}, transaction type: {transaction_type}, merchant_name: {merchant}", chunk.index);

        let mut frame = Frame::from_chunk(chunk);
        frame.map_headers(normalize);

        let schema = match self.registry.resolve(bank, transaction_type) {
            Ok(schema) => schema,
            Err(error) => {
                error!("{error}");
                return Ok(ChunkOutcome::Rejected(error.into()));
            }
        };

        if let Err(rejection) = check_headers(schema, &frame, bank, transaction_type) {
            error!("{rejection}");
            return Ok(ChunkOutcome::Rejected(rejection));
        }

        frame.rename_columns(|header| schema.target(header).map(|field| field.name()));

        frame.coerce_dates(CanonicalField::TransactionDate.name());
        frame.coerce_dates(CanonicalField::SettlementDate.name());

        let payable = CanonicalField::PayableMerchant.name();

        if frame.coerce_amounts(payable) && self.registry.reports_signed_settlement(bank) {
            frame.fill_missing_amounts(payable, Decimal::ZERO);
            frame.derive_direction(payable, CanonicalField::CreditDebitAmount.name());
        }

        let batch = Materializer::new(&self.registry).materialize(&mut frame, bank, transaction_type, merchant);
        let commit = self.committer.commit(batch.records).await?;

        let result = BatchResult::new(commit.committed, batch.failures.len() + commit.failed);

        debug!("Batch processing complete. Successful: {}, Failed: {}", result.total_successful, result.total_failed);

        self.results.publish(result).await;

        Ok(ChunkOutcome::Committed(result))
    }
}

/// Every expected header must be present, extra columns are allowed.
fn check_headers(schema: &BankSchema, frame: &Frame, bank: &str, transaction_type: &str) -> Result<(), ChunkRejection> {
    let missing = schema.missing_headers(frame.headers());

    if missing.is_empty() {
        return Ok(());
    }

    Err(ChunkRejection::MissingHeaders {
        bank: bank.to_string(),
        transaction_type: transaction_type.to_string(),
        missing
    })
}
