//! User Data

use crate::domain::users::records::{PasswordHash, UserUuid};

/// Account type assigned at registration.
pub const DEFAULT_USER_TYPE: &str = "normal";

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub user_name: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub user_type: String,
}
