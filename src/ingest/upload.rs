use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ingest::errors::ReadError;
use crate::ingest::format::{extension_of, FileFormat};

/// An input file copied to temporary storage, owned by the pipeline from here on.
#[derive(Debug, Clone)]
pub struct StagedUpload {
    pub path: PathBuf,
    pub format: FileFormat
}

/// Copies `source` into `staging_dir` under a fresh name that keeps its extension.
///
/// The copy is not deleted here, the ingestion driver removes it once the file is processed.
///
/// # Errors
/// `ReadError::EmptyFile` for zero-length input, `ReadError::Io` when the copy fails.
pub fn stage_upload(source: &Path, staging_dir: &Path) -> Result<StagedUpload, ReadError> {
    if fs::metadata(source)?.len() == 0 {
        return Err(ReadError::EmptyFile(source.display().to_string()));
    }

    let extension = extension_of(source);
    let suffix = if extension.is_empty() { String::new() } else { format!(".{extension}") };

    let mut staged = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&suffix)
        .tempfile_in(staging_dir)?;

    let mut input = File::open(source)?;
    io::copy(&mut input, &mut staged)?;

    let (_, path) = staged.keep().map_err(|error| ReadError::Io(error.error))?;
    let format = FileFormat::detect(&path);

    debug!("Staged {} as {} ({format})", source.display(), path.display());

    Ok(StagedUpload { path, format })
}
