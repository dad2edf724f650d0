//! Tokens

mod handlers;

pub(crate) use handlers::*;
