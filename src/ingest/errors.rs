use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Unsupported file format [{0}]")]
    UnsupportedFormat(String),
    #[error("Unsupported Excel format for file [{file}], extension [{extension}]")]
    UnsupportedExtension {
        file: String,
        extension: String
    },
    #[error("File [{0}] is empty")]
    EmptyFile(String),
    #[error("Workbook [{0}] has no sheets")]
    NoSheets(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error)
}

impl ReadError {
    /// Whether the file is skipped while the rest of the job goes on. Every other read
    /// failure aborts the job.
    pub fn skips_file(&self) -> bool {
        matches!(self, ReadError::UnsupportedFormat(_) | ReadError::UnsupportedExtension { .. })
    }
}
