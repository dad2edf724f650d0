//! Accounts
//!
//! Registration, activation, login, and password reset built on top of the
//! users, tokens, and permissions stores.

pub mod data;
pub mod errors;
pub mod service;

pub use errors::AccountsServiceError;
pub use service::*;
