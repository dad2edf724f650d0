//! Tokens

pub mod errors;
pub mod plaintext;
pub mod records;
mod repository;
pub mod service;

pub use errors::TokensServiceError;
pub use plaintext::*;
pub use repository::*;
pub use service::*;
