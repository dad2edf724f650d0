//! Shared application domain, persistence, and delivery modules.

pub mod background;
pub mod clock;
pub mod context;
pub mod database;
pub mod domain;
pub mod mailer;
pub mod validation;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

#[cfg(test)]
mod test;

mod uuids;
