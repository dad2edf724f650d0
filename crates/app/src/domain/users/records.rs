//! User Records

use std::fmt;

use jiff::Timestamp;

use crate::uuids::record_uuid;

record_uuid!(
    /// Identifies a [`UserRecord`].
    UserUuid
);

/// A bcrypt hash in its modular crypt string form.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    #[must_use]
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(**redacted**)")
    }
}

/// User Record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub created_at: Timestamp,
    pub user_name: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub user_type: String,

    /// Whether the account has been confirmed through its activation token.
    pub activated: bool,

    /// Optimistic concurrency counter, bumped on every update.
    pub version: i32,
}
