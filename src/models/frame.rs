use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::warn;

use crate::types::{to_amount, to_datetime, CreditDebit, Timestamp};

const DISPLAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A bounded slice of rows read from one input file.
///
/// Every row is a raw record aligned by position with `headers`. Header strings are taken
/// verbatim from the file and are untrusted until normalized.
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    /// Position of the chunk within its file.
    pub index: usize,
    /// Data row number (0-based, header excluded) of the first row in the file.
    pub first_row: usize,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>
}

impl Chunk {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self {
            index: 0,
            first_row: 0,
            headers,
            rows
        }
    }

    pub fn with_position(mut self, index: usize, first_row: usize) -> Self {
        self.index = index;
        self.first_row = first_row;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Text(Vec<Option<String>>),
    Amount(Vec<Option<Decimal>>),
    Date(Vec<Timestamp>),
    Direction(Vec<Option<CreditDebit>>)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues
}

/// Column-oriented view of a chunk that is renamed and coerced in place.
#[derive(Debug, Clone)]
pub struct Frame {
    columns: Vec<Column>,
    row_count: usize,
    first_row: usize
}

impl Frame {
    /// Transposes a chunk into columns. Short rows are padded with missing values.
    pub fn from_chunk(chunk: Chunk) -> Self {
        let row_count = chunk.rows.len();
        let mut values: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(row_count); chunk.headers.len()];

        for mut row in chunk.rows {
            row.resize(chunk.headers.len(), None);

            for (column, value) in values.iter_mut().zip(row) {
                column.push(value.filter(|value| !value.is_empty()));
            }
        }

        let columns = chunk.headers.into_iter()
            .zip(values)
            .map(|(name, values)| Column { name, values: ColumnValues::Text(values) })
            .collect();

        Self {
            columns,
            row_count,
            first_row: chunk.first_row
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// File position of the frame's first row, data rows counted from 0.
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    /// Rewrites every header through `transform`.
    pub fn map_headers<F>(&mut self, mut transform: F)
    where
        F: FnMut(&str) -> String,
    {
        for column in &mut self.columns {
            column.name = transform(&column.name);
        }
    }

    /// Renames the columns `lookup` knows about and leaves the others untouched.
    pub fn rename_columns<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<&'static str>,
    {
        for column in &mut self.columns {
            if let Some(target) = lookup(&column.name) {
                column.name = target.to_string();
            }
        }
    }

    /// Parses a text column into amounts. Returns `false` when the column does not exist.
    ///
    /// Values that do not parse become missing and are logged together with their row.
    pub fn coerce_amounts(&mut self, name: &str) -> bool {
        let first_row = self.first_row;

        let Some(column) = self.column_mut(name) else {
            return false;
        };

        if let ColumnValues::Text(values) = &column.values {
            let mut failures = Vec::new();

            let amounts: Vec<Option<Decimal>> = values.iter().enumerate().map(|(index, value)| {
                let value = value.as_deref()?;
                let amount = to_amount(value);

                if amount.is_none() {
                    failures.push((first_row + index, value.to_string()));
                }

                amount
            }).collect();

            if !failures.is_empty() {
                warn!("Could not parse amounts in column '{name}'; rows and values affected: {failures:?}");
            }

            column.values = ColumnValues::Amount(amounts);
        }

        true
    }

    /// Parses a text column into timestamps. Returns `false` when the column does not exist.
    ///
    /// Empty and unparseable cells become `Timestamp::NotATime`, their rows are logged.
    pub fn coerce_dates(&mut self, name: &str) -> bool {
        let first_row = self.first_row;

        let Some(column) = self.column_mut(name) else {
            return false;
        };

        if let ColumnValues::Text(values) = &column.values {
            let timestamps: Vec<Timestamp> = values.iter()
                .map(|value| Timestamp::from(value.as_deref().and_then(to_datetime)))
                .collect();

            let affected: Vec<usize> = timestamps.iter().enumerate()
                .filter(|(_, timestamp)| timestamp.is_not_a_time())
                .map(|(index, _)| first_row + index)
                .collect();

            if !affected.is_empty() {
                warn!("Could not parse dates in column '{name}'; rows affected: {affected:?}");
            }

            column.values = ColumnValues::Date(timestamps);
        }

        true
    }

    /// Replaces missing amounts in an already coerced column.
    pub fn fill_missing_amounts(&mut self, name: &str, fill: Decimal) {
        if let Some(Column { values: ColumnValues::Amount(amounts), .. }) = self.column_mut(name) {
            for amount in amounts.iter_mut().filter(|amount| amount.is_none()) {
                *amount = Some(fill);
            }
        }
    }

    /// Adds (or replaces) `target` with the credit/debit direction of the amounts in `source`.
    pub fn derive_direction(&mut self, source: &str, target: &str) {
        let directions: Vec<Option<CreditDebit>> = (0..self.row_count)
            .map(|row| self.amount(source, row).and_then(CreditDebit::from_signed))
            .collect();

        let values = ColumnValues::Direction(directions);

        match self.columns.iter().position(|column| column.name == target) {
            Some(position) => self.columns[position].values = values,
            None => self.columns.push(Column { name: target.to_string(), values })
        }
    }

    pub fn text(&self, name: &str, row: usize) -> Option<String> {
        match &self.column(name)?.values {
            ColumnValues::Text(values) => values.get(row)?.clone(),
            ColumnValues::Amount(values) => values.get(row)?.map(|amount| amount.to_string()),
            ColumnValues::Date(values) => match values.get(row)? {
                Timestamp::At(datetime) => Some(datetime.format(DISPLAY_DATETIME_FORMAT).to_string()),
                Timestamp::NotATime => None
            },
            ColumnValues::Direction(values) => values.get(row)?.map(|direction| match direction {
                CreditDebit::Credit => "CREDIT".to_string(),
                CreditDebit::Debit => "DEBIT".to_string()
            })
        }
    }

    pub fn amount(&self, name: &str, row: usize) -> Option<Decimal> {
        match &self.column(name)?.values {
            ColumnValues::Amount(values) => *values.get(row)?,
            ColumnValues::Text(values) => values.get(row)?.as_deref().and_then(to_amount),
            _ => None
        }
    }

    /// `None` when the column is absent, otherwise the cell, which may be `NotATime`.
    pub fn timestamp(&self, name: &str, row: usize) -> Option<Timestamp> {
        match &self.column(name)?.values {
            ColumnValues::Date(values) => values.get(row).copied(),
            ColumnValues::Text(values) => {
                let value: Option<NaiveDateTime> = values.get(row)?.as_deref().and_then(to_datetime);
                Some(Timestamp::from(value))
            }
            _ => Some(Timestamp::NotATime)
        }
    }

    pub fn direction(&self, name: &str, row: usize) -> Option<CreditDebit> {
        match &self.column(name)?.values {
            ColumnValues::Direction(values) => *values.get(row)?,
            _ => None
        }
    }

    fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.name == name)
    }
}
