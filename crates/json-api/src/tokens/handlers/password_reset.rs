//! Create Password Reset Token Handler

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

/// Create Password Reset Token Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePasswordResetTokenRequest {
    pub email: String,
}

/// Create Password Reset Token Handler
///
/// Mails a password-reset token to an activated account.
#[endpoint(
    tags("tokens"),
    summary = "Request Password Reset",
    responses(
        (status_code = StatusCode::ACCEPTED, description = "Reset mail queued"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePasswordResetTokenRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .accounts
        .request_password_reset(&json.into_inner().email)
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::ACCEPTED);

    Ok(Json(MessageResponse::new(
        "an email will be sent to you containing password reset instructions",
    )))
}
