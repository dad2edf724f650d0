//! Permissions

pub mod errors;
pub mod records;
mod repository;

pub use errors::PermissionsRepositoryError;
pub use records::*;
pub use repository::*;
