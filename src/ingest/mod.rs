mod csv_chunks;
mod errors;
mod format;
mod temp_file;
mod upload;
mod workbook;

use std::path::Path;

use crate::models::Chunk;

pub use csv_chunks::CsvChunks;
pub use errors::ReadError;
pub use format::FileFormat;
pub use temp_file::TempFileGuard;
pub use upload::stage_upload;

/// Chunks of one input file in file order.
pub enum ChunkReader {
    Csv(CsvChunks),
    Workbook(Option<Chunk>)
}

impl ChunkReader {
    /// Opens `path` according to its declared format.
    ///
    /// CSV files stream in chunks of `chunk_size` rows, workbooks load whole as a single chunk.
    ///
    /// # Errors
    /// `ReadError::UnsupportedExtension` when a workbook does not end in `.xlsx`, `.xls` or `.ods`,
    /// otherwise any error raised while opening the file.
    pub fn open(path: &Path, format: FileFormat, chunk_size: usize) -> Result<Self, ReadError> {
        match format {
            FileFormat::Csv => Ok(ChunkReader::Csv(CsvChunks::open(path, chunk_size)?)),
            FileFormat::Excel => Ok(ChunkReader::Workbook(Some(workbook::read_first_sheet(path)?)))
        }
    }
}

impl Iterator for ChunkReader {
    type Item = Result<Chunk, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ChunkReader::Csv(chunks) => chunks.next(),
            ChunkReader::Workbook(chunk) => chunk.take().map(Ok)
        }
    }
}
