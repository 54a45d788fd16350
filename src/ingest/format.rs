use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

use crate::ingest::errors::ReadError;

pub(crate) const WORKBOOK_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "ods"];

/// Declared format of an uploaded file.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FileFormat {
    Excel,
    Csv
}

impl FileFormat {
    /// Format tag for an upload, workbook extensions are Excel and everything else is CSV.
    pub fn detect(path: &Path) -> Self {
        if WORKBOOK_EXTENSIONS.contains(&extension_of(path).as_str()) {
            FileFormat::Excel
        } else {
            FileFormat::Csv
        }
    }
}

impl Display for FileFormat {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Excel => formatter.write_str("excel"),
            FileFormat::Csv => formatter.write_str("csv")
        }
    }
}

impl FromStr for FileFormat {
    type Err = ReadError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "excel" => Ok(FileFormat::Excel),
            "csv" => Ok(FileFormat::Csv),
            other => Err(ReadError::UnsupportedFormat(other.to_string()))
        }
    }
}

/// Lowercased extension without the dot, empty when there is none.
pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|extension| extension.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
