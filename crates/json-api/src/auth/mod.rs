//! Authentication and authorization middleware.

mod caller;
mod gates;
mod middleware;

pub(crate) use caller::Caller;
pub(crate) use gates::{RequirePermission, require_activated, require_authenticated};
pub(crate) use middleware::authenticate;
