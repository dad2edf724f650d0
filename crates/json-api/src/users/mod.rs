//! Users
//!
//! Account lifecycle endpoints. The error mapping and response models are
//! shared with the token endpoints, which drive the same accounts service.

pub(crate) mod errors;
mod handlers;
pub(crate) mod models;

pub(crate) use handlers::*;
