use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store refused this batch, nothing from it was written.
    #[error("Batch rejected by store: {0}")]
    Rejected(String),
    /// The store could not be reached at all.
    #[error("Store unavailable: {0}")]
    Unavailable(String)
}
