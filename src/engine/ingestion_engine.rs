use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{error, info};

use crate::engine::chunk_processor::{ChunkOutcome, ChunkProcessor};
use crate::engine::{PipelineConfig, PipelineError};
use crate::ingest::{ChunkReader, FileFormat, ReadError, TempFileGuard};
use crate::models::Chunk;
use crate::schema::BankSchemaRegistry;
use crate::storage::{ResultCache, TransactionStore};

/// One upload: temporary files with their format tags, aligned by index.
#[derive(Debug, Clone)]
pub struct IngestJob {
    pub files: Vec<PathBuf>,
    pub formats: Vec<String>,
    pub bank: String,
    pub transaction_type: String,
    pub merchant: String
}

/// Drives every file of a job through the chunk processor.
pub struct IngestionEngine<S> {
    processor: ChunkProcessor<S>,
    chunk_size: usize,
    backpressure: usize
}

impl<S: TransactionStore> IngestionEngine<S> {
    /// Creates a new engine writing to `store` and publishing to `results`.
    pub fn new(store: Arc<S>, results: ResultCache, registry: Arc<BankSchemaRegistry>, config: &PipelineConfig) -> Self {
        Self {
            processor: ChunkProcessor::new(registry, store, results),
            chunk_size: config.chunk_size,
            backpressure: 2
        }
    }

    /// Processes the job's files in order, then chunks in file order.
    ///
    /// Unsupported format tags and workbook extensions are logged and skipped. Each temporary
    /// file is deleted once its own processing ends, however it ends.
    ///
    /// # Errors
    /// Ingestion-level faults: mismatched file and format lists, a file that cannot be read,
    /// or an unavailable store.
    pub async fn run(&self, job: &IngestJob) -> Result<(), PipelineError> {
        info!(
            "Starting ingestion with bank_name: {}, transaction_type: {}, file_formats: {:?}, merchant_name: {}",
            job.bank, job.transaction_type, job.formats, job.merchant
        );

        if job.files.len() != job.formats.len() {
            return Err(PipelineError::FormatCountMismatch {
                files: job.files.len(),
                formats: job.formats.len()
            });
        }

        info!("Total number of files to process: {}", job.files.len());

        for (path, format) in job.files.iter().zip(&job.formats) {
            let guard = TempFileGuard::new(path);
            let file_name = display_name(guard.path());

            info!("Processing file: {file_name} of type {}", job.transaction_type);

            let format = match FileFormat::from_str(format) {
                Ok(format) => format,
                Err(error) => {
                    error!("{error} for file: {file_name}");
                    continue;
                }
            };

            self.process_file(guard.path(), format, job).await?;

            info!("File processing completed for {file_name}");
        }

        info!("All files have been processed.");

        Ok(())
    }

    async fn process_file(&self, path: &Path, format: FileFormat, job: &IngestJob) -> Result<(), PipelineError> {
        let file_name = display_name(path);
        let (sender, mut receiver) = mpsc::channel::<Result<Chunk, ReadError>>(self.backpressure);
        let reader_handle = self.spawn_chunk_reader(path.to_path_buf(), format, sender);
        let mut failure = None;

        while let Some(result) = receiver.recv().await {
            let chunk = match result {
                Ok(chunk) => chunk,
                Err(error) if error.skips_file() => {
                    error!("{error}. Skipping file: {file_name}");
                    break;
                }
                Err(error) => {
                    error!("Error processing chunk from file: {file_name}. {error}");
                    failure = Some(error);
                    break;
                }
            };

            let index = chunk.index;

            match self.processor.process(chunk, &job.bank, &job.transaction_type, &job.merchant).await? {
                ChunkOutcome::Committed(result) => {
                    info!("Chunk [{index}] of {file_name}: {} successful, {} failed", result.total_successful, result.total_failed)
                }
                ChunkOutcome::Rejected(reason) => info!("Chunk [{index}] of {file_name} skipped: {reason}")
            }
        }

        drop(receiver);

        if let Err(error) = reader_handle.await {
            error!("Chunk reader for {file_name} failed: {error}");
        }

        match failure {
            Some(source) => Err(PipelineError::Read { file: file_name, source }),
            None => Ok(())
        }
    }

    fn spawn_chunk_reader(&self, path: PathBuf, format: FileFormat, sender: mpsc::Sender<Result<Chunk, ReadError>>) -> JoinHandle<()> {
        let chunk_size = self.chunk_size;

        spawn_blocking(move || {
            let reader = match ChunkReader::open(&path, format, chunk_size) {
                Ok(reader) => reader,
                Err(error) => {
                    let _ = sender.blocking_send(Err(error));
                    return;
                }
            };

            for result in reader {
                if sender.blocking_send(result).is_err() {
                    break;
                }
            }
        })
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
