//! Idea Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use openconnect_app::{domain::ideas::data::IdeaFilters, validation::FieldErrors};

use crate::{
    errors::ApiError,
    extensions::*,
    ideas::{
        errors::into_api_error,
        models::{IdeaResponse, MetadataResponse},
    },
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IdeasResponse {
    /// The requested page of ideas
    pub ideas: Vec<IdeaResponse>,

    pub metadata: MetadataResponse,
}

/// Idea Index Handler
///
/// Lists ideas matching every supplied filter.
#[endpoint(
    tags("ideas"),
    summary = "List Ideas",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    title: QueryParam<String, false>,
    category: QueryParam<String, false>,
    tags: QueryParam<String, false>,
    page: QueryParam<String, false>,
    page_size: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<IdeasResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let defaults = IdeaFilters::default();
    let mut errors = FieldErrors::new();

    let filters = IdeaFilters {
        title: title.or_default_str(""),
        category: category.or_default_str(""),
        tags: tags.into_csv(),
        page: page.into_u32("page", defaults.page, &mut errors),
        page_size: page_size.into_u32("page_size", defaults.page_size, &mut errors),
        sort: sort.or_default_str(&defaults.sort),
    };

    errors.into_result()?;

    let page = state
        .app
        .ideas
        .list(filters)
        .await
        .map_err(into_api_error)?;

    Ok(Json(IdeasResponse {
        ideas: page.ideas.into_iter().map(Into::into).collect(),
        metadata: page.metadata.into(),
    }))
}
