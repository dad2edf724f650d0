//! Activate User Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    errors::ApiError,
    extensions::*,
    state::State,
    users::{errors::into_api_error, models::UserEnvelope},
};

/// Activate User Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActivateUserRequest {
    /// Plaintext activation token from the welcome mail
    pub token: String,
}

/// Activate User Handler
#[endpoint(tags("users"), summary = "Activate User")]
pub(crate) async fn handler(
    json: JsonBody<ActivateUserRequest>,
    depot: &mut Depot,
) -> Result<Json<UserEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .accounts
        .activate(&json.into_inner().token)
        .await
        .map_err(into_api_error)?;

    Ok(Json(user.into()))
}
