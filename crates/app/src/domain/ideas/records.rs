//! Idea Records

use jiff::Timestamp;

use crate::{domain::users::records::UserUuid, uuids::record_uuid};

record_uuid!(
    /// Identifies an [`IdeaRecord`].
    IdeaUuid
);

/// Idea Record
#[derive(Debug, Clone, PartialEq)]
pub struct IdeaRecord {
    pub uuid: IdeaUuid,

    /// Submitting user.
    pub user_uuid: UserUuid,

    pub created_at: Timestamp,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub version: i32,
}
