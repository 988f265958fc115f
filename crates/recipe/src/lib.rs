mod query;
pub mod repository;
mod root;

pub use query::*;
pub use repository::Recipe;
pub use root::*;
