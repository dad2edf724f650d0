//! Create Authentication Token Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use openconnect_app::domain::tokens::records::IssuedToken;

use crate::{errors::ApiError, extensions::*, state::State, users::errors::into_api_error};

/// Create Authentication Token Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateAuthenticationTokenRequest {
    pub email: String,
    pub password: String,
}

/// A freshly issued bearer token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenResponse {
    /// Plaintext token; it cannot be retrieved again
    pub token: String,

    /// The date and time the token stops working
    pub expiry: String,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        TokenResponse {
            token: issued.plaintext.as_str().to_string(),
            expiry: issued.expiry.to_string(),
        }
    }
}

/// Authentication Token Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthenticationTokenResponse {
    pub authentication_token: TokenResponse,
}

/// Create Authentication Token Handler
///
/// Exchanges an email and password for a bearer token.
#[endpoint(
    tags("tokens"),
    summary = "Create Authentication Token",
    responses(
        (status_code = StatusCode::CREATED, description = "Token issued"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateAuthenticationTokenRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AuthenticationTokenResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let issued = state
        .app
        .accounts
        .login(&request.email, &request.password)
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(AuthenticationTokenResponse {
        authentication_token: issued.into(),
    }))
}
