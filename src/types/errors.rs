use thiserror::Error;

#[derive(Debug, Error)]
#[error("Unexpected transaction type [{0}], expected one of booking, refund, both")]
pub struct TransactionTypeError(pub String);
