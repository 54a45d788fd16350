use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

/// Deletes an uploaded temporary file when dropped, whatever happened while it was processed.
pub struct TempFileGuard {
    path: PathBuf
}

impl TempFileGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => info!("Deleted temporary file: {}", self.path.display()),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                warn!("File not found for deletion: {}", self.path.display())
            }
            Err(error) => error!("Could not delete temporary file {}: {error}", self.path.display())
        }
    }
}
