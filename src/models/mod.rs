mod batch;
mod fields;
mod frame;
#[cfg(test)]
mod tests;
mod transaction_record;

pub use batch::BatchResult;
pub use fields::CanonicalField;
pub use frame::{Chunk, Frame};
pub use transaction_record::TransactionRecord;
