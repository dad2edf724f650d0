//! OpenConnect Domain Concerns

pub mod accounts;
pub mod ideas;
pub mod permissions;
pub mod tokens;
pub mod users;
