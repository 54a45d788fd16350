mod errors;
mod job_runner;
#[cfg(test)]
mod tests;

pub use errors::JobError;
pub use job_runner::JobRunner;
