use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ByteRecord, Reader, ReaderBuilder, Trim};

use crate::ingest::errors::ReadError;
use crate::models::Chunk;

/// Streams a comma separated file as fixed size chunks of rows.
///
/// Fields are double-quoted only where needed. Invalid UTF-8 is replaced rather than rejected
/// since bank exports are frequently produced in legacy encodings.
pub struct CsvChunks {
    reader: Reader<BufReader<File>>,
    headers: Vec<String>,
    chunk_size: usize,
    next_index: usize,
    next_row: usize,
    finished: bool
}

impl CsvChunks {
    pub fn open(path: &Path, chunk_size: usize) -> Result<Self, ReadError> {
        let file = File::open(path)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(b',')
            .quote(b'"')
            .double_quote(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers = reader.byte_headers()?.iter().map(decode).collect();

        Ok(Self {
            reader,
            headers,
            chunk_size: chunk_size.max(1),
            next_index: 0,
            next_row: 0,
            finished: false
        })
    }
}

impl Iterator for CsvChunks {
    type Item = Result<Chunk, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut record = ByteRecord::new();
        let mut rows: Vec<Vec<Option<String>>> = Vec::with_capacity(self.chunk_size.min(1024));

        while rows.len() < self.chunk_size {
            match self.reader.read_byte_record(&mut record) {
                Ok(true) => rows.push(record.iter().map(|field| Some(decode(field))).collect()),
                Ok(false) => {
                    self.finished = true;
                    break;
                }
                Err(error) => {
                    //NOTE: A malformed record abandons the rest of the file, rows already handed out stay processed
                    self.finished = true;
                    return Some(Err(error.into()));
                }
            }
        }

        if rows.is_empty() {
            return None;
        }

        let row_count = rows.len();
        let chunk = Chunk::new(self.headers.clone(), rows).with_position(self.next_index, self.next_row);

        self.next_index += 1;
        self.next_row += row_count;

        Some(Ok(chunk))
    }
}

fn decode(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}
