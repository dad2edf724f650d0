//! Revoke Authentication Tokens Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::error;

use openconnect_app::domain::tokens::records::TokenScope;

use crate::{errors::ApiError, extensions::*, state::State, users::models::MessageResponse};

/// Revoke Authentication Tokens Handler
///
/// Signs the caller out everywhere. Activation is not required.
#[endpoint(
    tags("tokens"),
    summary = "Revoke Authentication Tokens",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Tokens revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MessageResponse>, ApiError> {
    let user = depot
        .caller()
        .user()
        .map(|user| user.uuid)
        .ok_or(ApiError::AuthenticationRequired)?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .tokens
        .revoke_all(TokenScope::Authentication, user)
        .await
        .map_err(|source| {
            error!(user = %user, "failed to revoke authentication tokens: {source}");

            ApiError::ServerError
        })?;

    Ok(Json(MessageResponse::new("you have been signed out")))
}
