//! Reset Password Handler

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
    users::{errors::into_api_error, models::MessageResponse},
};

/// Reset Password Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ResetPasswordRequest {
    /// The new password
    pub password: String,

    /// Plaintext password-reset token from the reset mail
    pub token: String,
}

/// Reset Password Handler
#[endpoint(tags("users"), summary = "Reset Password")]
pub(crate) async fn handler(
    json: JsonBody<ResetPasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    state
        .app
        .accounts
        .reset_password(&request.token, &request.password)
        .await
        .map_err(into_api_error)?;

    Ok(Json(MessageResponse::new(
        "your password was successfully reset",
    )))
}
