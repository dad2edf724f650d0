//! Caller identity.

use openconnect_app::domain::users::records::UserRecord;

/// Who is making the current request.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Caller {
    /// No `Authorization` header was sent.
    Anonymous,

    /// Resolved from a live authentication token.
    User(UserRecord),
}

impl Caller {
    pub(crate) fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user),
        }
    }
}
