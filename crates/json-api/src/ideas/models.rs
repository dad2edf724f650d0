//! Idea Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use openconnect_app::domain::ideas::{data::PageMetadata, records::IdeaRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IdeaResponse {
    /// The unique identifier of the idea
    pub id: Uuid,

    /// The date and time the idea was submitted
    pub created_at: String,

    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,

    /// The user who submitted the idea
    pub submitted_by: Uuid,

    pub version: i32,
}

impl From<IdeaRecord> for IdeaResponse {
    fn from(idea: IdeaRecord) -> Self {
        IdeaResponse {
            id: idea.uuid.into(),
            created_at: idea.created_at.to_string(),
            title: idea.title,
            description: idea.description,
            category: idea.category,
            tags: idea.tags,
            submitted_by: idea.user_uuid.into(),
            version: idea.version,
        }
    }
}

/// `{"idea": ...}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IdeaEnvelope {
    pub idea: IdeaResponse,
}

impl From<IdeaRecord> for IdeaEnvelope {
    fn from(idea: IdeaRecord) -> Self {
        Self { idea: idea.into() }
    }
}

/// Paging summary; all zeroes when nothing matched.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MetadataResponse {
    pub current_page: u32,
    pub page_size: u32,
    pub first_page: u32,
    pub last_page: u64,
    pub total_records: u64,
}

impl From<PageMetadata> for MetadataResponse {
    fn from(metadata: PageMetadata) -> Self {
        MetadataResponse {
            current_page: metadata.current_page,
            page_size: metadata.page_size,
            first_page: metadata.first_page,
            last_page: metadata.last_page,
            total_records: metadata.total_records,
        }
    }
}
