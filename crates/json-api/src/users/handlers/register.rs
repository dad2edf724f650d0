//! Register User Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use openconnect_app::domain::accounts::data::Registration;

use crate::{
    errors::ApiError,
    extensions::*,
    state::State,
    users::{errors::into_api_error, models::UserEnvelope},
};

/// Register User Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<RegisterUserRequest> for Registration {
    fn from(request: RegisterUserRequest) -> Self {
        Registration {
            user_name: request.username,
            email: request.email,
            password: request.password,
        }
    }
}

/// Register User Handler
///
/// Creates an inactive account and mails its activation token.
#[endpoint(
    tags("users"),
    summary = "Register User",
    responses(
        (status_code = StatusCode::ACCEPTED, description = "User registered"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .accounts
        .register(json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::ACCEPTED);

    Ok(Json(user.into()))
}
