//! User Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use openconnect_app::domain::users::records::UserRecord;

/// Public view of an account; the password hash never leaves the server.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub id: Uuid,

    /// The date and time the account was created
    pub created_at: String,

    pub username: String,
    pub email: String,
    pub user_type: String,
    pub activated: bool,
    pub version: i32,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            id: user.uuid.into(),
            created_at: user.created_at.to_string(),
            username: user.user_name,
            email: user.email,
            user_type: user.user_type,
            activated: user.activated,
            version: user.version,
        }
    }
}

/// `{"user": ...}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserEnvelope {
    pub user: UserResponse,
}

impl From<UserRecord> for UserEnvelope {
    fn from(user: UserRecord) -> Self {
        Self { user: user.into() }
    }
}

/// `{"message": ...}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
