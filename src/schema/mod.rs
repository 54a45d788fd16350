mod errors;
mod normalize;
mod registry;

pub use errors::SchemaError;
pub use normalize::normalize;
pub use registry::{BankSchema, BankSchemaRegistry};
