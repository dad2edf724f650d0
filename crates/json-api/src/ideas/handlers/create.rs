//! Create Idea Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use openconnect_app::domain::ideas::data::NewIdea;

use crate::{
    errors::ApiError,
    extensions::*,
    ideas::{errors::into_api_error, models::IdeaEnvelope},
    state::State,
};

/// Create Idea Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateIdeaRequest {
    pub title: String,
    pub description: String,
    pub category: String,

    /// Between one and five distinct tags
    pub tags: Vec<String>,
}

impl From<CreateIdeaRequest> for NewIdea {
    fn from(request: CreateIdeaRequest) -> Self {
        NewIdea {
            title: request.title,
            description: request.description,
            category: request.category,
            tags: request.tags,
        }
    }
}

/// Create Idea Handler
///
/// Submits an idea on behalf of the caller.
#[endpoint(
    tags("ideas"),
    summary = "Create Idea",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Idea created"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateIdeaRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<IdeaEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let author = depot
        .caller()
        .user()
        .map(|user| user.uuid)
        .ok_or(ApiError::AuthenticationRequired)?;

    let idea = state
        .app
        .ideas
        .create(author, json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/v1/ideas/{}", idea.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(idea.into()))
}
