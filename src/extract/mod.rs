pub mod oracle;
pub mod orchestrator;

pub use oracle::*;
pub use orchestrator::*;
