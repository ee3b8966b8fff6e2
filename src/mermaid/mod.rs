pub mod generator;
pub mod label;

pub use generator::*;
pub use label::*;
