pub mod repository;
mod root;

pub use repository::User;
pub use root::*;
