//! Users

pub mod data;
pub mod errors;
pub mod password;
pub mod records;
mod repository;

pub use errors::UsersRepositoryError;
pub use repository::*;
