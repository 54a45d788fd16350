mod coercion;
mod errors;

use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

pub use coercion::{to_amount, to_datetime};
pub use errors::TransactionTypeError;

pub type BankCode = u32;

/// The schema variant a settlement file was uploaded as.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Booking,
    Refund,
    Both
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Booking => "booking",
            TransactionType::Refund => "refund",
            TransactionType::Both => "both"
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = TransactionTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "booking" => Ok(TransactionType::Booking),
            "refund" => Ok(TransactionType::Refund),
            "both" => Ok(TransactionType::Both),
            other => Err(TransactionTypeError(other.to_string()))
        }
    }
}

/// Direction of a signed net settlement amount.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CreditDebit {
    Credit,
    Debit
}

impl CreditDebit {
    /// Positive amounts are credits, negative amounts debits, zero has no direction.
    pub fn from_signed(amount: Decimal) -> Option<Self> {
        if amount > Decimal::ZERO {
            Some(CreditDebit::Credit)
        } else if amount < Decimal::ZERO {
            Some(CreditDebit::Debit)
        } else {
            None
        }
    }
}

/// A coerced date cell. `NotATime` marks a cell that was empty or could not be parsed
/// and has to be rewritten to a missing value before a record leaves the materializer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Timestamp {
    At(NaiveDateTime),
    NotATime
}

impl Timestamp {
    pub fn is_not_a_time(&self) -> bool {
        matches!(self, Timestamp::NotATime)
    }
}

impl From<Option<NaiveDateTime>> for Timestamp {
    fn from(value: Option<NaiveDateTime>) -> Self {
        value.map_or(Timestamp::NotATime, Timestamp::At)
    }
}
