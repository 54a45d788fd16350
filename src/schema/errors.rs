use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("No valid mapping found for bank [{bank}] and transaction type [{transaction_type}]")]
    NotFound {
        bank: String,
        transaction_type: String
    },
    #[error("No bank code registered for bank [{0}]")]
    UnknownBank(String)
}
