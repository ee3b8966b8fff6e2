pub mod ids;
pub mod json;
pub mod model;

pub use ids::*;
pub use model::*;
