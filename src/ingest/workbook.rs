use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::ingest::errors::ReadError;
use crate::ingest::format::{extension_of, WORKBOOK_EXTENSIONS};
use crate::models::Chunk;

const EXCEL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Loads the first worksheet of an `.xlsx`, `.xls` or `.ods` file with every cell as text.
pub(crate) fn read_first_sheet(path: &Path) -> Result<Chunk, ReadError> {
    let extension = extension_of(path);

    if !WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ReadError::UnsupportedExtension {
            file: path.display().to_string(),
            extension
        });
    }

    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook.sheet_names().first().cloned()
        .ok_or_else(|| ReadError::NoSheets(path.display().to_string()))?;

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let headers: Vec<String> = rows.next()
        .map(|row| row.iter().map(|cell| cell_to_string(cell).unwrap_or_default()).collect())
        .unwrap_or_default();

    let rows: Vec<Vec<Option<String>>> = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(Chunk::new(headers, rows))
}

fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(value) | Data::DateTimeIso(value) | Data::DurationIso(value) => Some(value.clone()),
        Data::DateTime(value) => Some(value.as_datetime()
            .map(|datetime| datetime.format(EXCEL_DATETIME_FORMAT).to_string())
            .unwrap_or_else(|| value.as_f64().to_string())),
        other => Some(other.to_string())
    }
}
