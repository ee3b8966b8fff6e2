pub mod parser;
pub mod schema;
pub mod validation;

pub use parser::*;
pub use schema::*;
pub use validation::*;
