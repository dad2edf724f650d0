//! Update Idea Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use openconnect_app::domain::ideas::data::IdeaUpdate;

use crate::{
    errors::ApiError,
    extensions::*,
    ideas::{errors::into_api_error, models::IdeaEnvelope},
    state::State,
};

/// Update Idea Request
///
/// Omitted fields keep their stored values.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateIdeaRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl From<UpdateIdeaRequest> for IdeaUpdate {
    fn from(request: UpdateIdeaRequest) -> Self {
        IdeaUpdate {
            title: request.title,
            description: request.description,
            category: request.category,
            tags: request.tags,
        }
    }
}

/// Update Idea Handler
#[endpoint(
    tags("ideas"),
    summary = "Update Idea",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "ideas.update",
    skip(idea, json, depot),
    fields(idea_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    idea: PathParam<Uuid>,
    json: JsonBody<UpdateIdeaRequest>,
    depot: &mut Depot,
) -> Result<Json<IdeaEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let idea = idea.into_inner();

    tracing::Span::current().record("idea_uuid", tracing::field::display(idea));

    let updated = state
        .app
        .ideas
        .update(idea.into(), json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    tracing::info!(idea_uuid = %idea, version = updated.version, "updated idea");

    Ok(Json(updated.into()))
}
