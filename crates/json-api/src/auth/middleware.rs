//! Authentication middleware.

use std::sync::Arc;

use salvo::{
    http::header::{AUTHORIZATION, HeaderValue, VARY},
    prelude::*,
};
use tracing::error;

use openconnect_app::domain::tokens::{TokensServiceError, is_well_formed, records::TokenScope};

use crate::{auth::Caller, errors::ApiError, extensions::*, state::State};

/// Resolve the `Authorization` header into a [`Caller`].
///
/// A missing header is not an error here: the request continues as
/// [`Caller::Anonymous`] and the route's gates decide.
#[handler]
pub(crate) async fn authenticate(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    res.headers_mut()
        .append(VARY, HeaderValue::from_static("Authorization"));

    match resolve_caller(req, depot).await {
        Ok(caller) => {
            depot.insert_caller(caller);

            ctrl.call_next(req, depot, res).await;
        }
        Err(rejection) => {
            res.render(rejection);
            ctrl.skip_rest();
        }
    }
}

async fn resolve_caller(req: &Request, depot: &Depot) -> Result<Caller, ApiError> {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        return Ok(Caller::Anonymous);
    };

    let token = header
        .to_str()
        .map_err(|_ignored| ApiError::InvalidAuthenticationToken)
        .and_then(bearer_token)?;

    if !is_well_formed(token) {
        return Err(ApiError::InvalidCredentials);
    }

    let state = depot.obtain_or_500::<Arc<State>>()?;

    match state
        .app
        .tokens
        .lookup_user(TokenScope::Authentication, token)
        .await
    {
        Ok(user) => Ok(Caller::User(user)),
        Err(TokensServiceError::NotFound) => Err(ApiError::InvalidAuthenticationToken),
        Err(source) => {
            error!("failed to look up authentication token: {source}");

            Err(ApiError::ServerError)
        }
    }
}

/// Exactly `Bearer <token>`, split on single spaces.
fn bearer_token(value: &str) -> Result<&str, ApiError> {
    let parts: Vec<&str> = value.split(' ').collect();

    match parts.as_slice() {
        ["Bearer", token] => Ok(*token),
        _ => Err(ApiError::InvalidAuthenticationToken),
    }
}

#[cfg(test)]
mod tests {
    use openconnect_app::domain::tokens::TokenPlaintext;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, make_user, service};

    use super::*;

    #[handler]
    async fn echo_caller(depot: &mut Depot, res: &mut Response) {
        let who = depot
            .caller()
            .user()
            .map_or_else(|| "anonymous".to_string(), |user| user.email.clone());

        res.render(who);
    }

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::new().hoop(authenticate).get(echo_caller))
    }

    #[test]
    fn bearer_token_requires_exactly_two_parts() {
        assert_eq!(bearer_token("Bearer abc").ok(), Some("abc"));
        assert!(bearer_token("bearer abc").is_err());
        assert!(bearer_token("Bearer  abc").is_err());
        assert!(bearer_token("Bearer a b").is_err());
        assert!(bearer_token("Basic abc").is_err());
        assert_eq!(bearer_token("Bearer ").ok(), Some(""));
    }

    #[tokio::test]
    async fn missing_header_continues_as_anonymous() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.tokens.expect_lookup_user().never();

        let mut res = TestClient::get("http://example.com")
            .send(&make_service(mocks))
            .await;

        let vary = res
            .headers()
            .get(VARY)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(vary.as_deref(), Some("Authorization"));
        assert_eq!(res.take_string().await?, "anonymous");

        Ok(())
    }

    #[tokio::test]
    async fn non_bearer_header_is_an_invalid_token() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.tokens.expect_lookup_user().never();

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(mocks))
            .await;

        let challenge = res.headers().contains_key("www-authenticate");
        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert!(challenge, "expected a WWW-Authenticate challenge");
        assert_eq!(body["error"], "invalid or missing authentication token");

        Ok(())
    }

    #[tokio::test]
    async fn malformed_token_never_reaches_the_store() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.tokens.expect_lookup_user().never();

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer too-short", true)
            .send(&make_service(mocks))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body["error"], "invalid authentication credentials");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() -> TestResult {
        let token = TokenPlaintext::generate();
        let expected = token.as_str().to_string();

        let mut mocks = Mocks::default();

        mocks
            .tokens
            .expect_lookup_user()
            .once()
            .withf(move |scope, plaintext| {
                *scope == TokenScope::Authentication && plaintext == expected
            })
            .return_once(|_, _| Err(TokensServiceError::NotFound));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, format!("Bearer {}", token.as_str()), true)
            .send(&make_service(mocks))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body["error"], "invalid or missing authentication token");

        Ok(())
    }

    #[tokio::test]
    async fn store_failure_is_a_server_error() -> TestResult {
        let token = TokenPlaintext::generate();

        let Err(source) = jiff::Timestamp::from_second(i64::MAX) else {
            return Err("expected an out of range timestamp".into());
        };

        let mut mocks = Mocks::default();

        mocks
            .tokens
            .expect_lookup_user()
            .once()
            .return_once(move |_, _| Err(TokensServiceError::Expiry(source)));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, format!("Bearer {}", token.as_str()), true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[tokio::test]
    async fn valid_token_attaches_the_user() -> TestResult {
        let token = TokenPlaintext::generate();
        let user = make_user("uma@example.com", true);

        let mut mocks = Mocks::default();

        mocks
            .tokens
            .expect_lookup_user()
            .once()
            .return_once(move |_, _| Ok(user));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, format!("Bearer {}", token.as_str()), true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "uma@example.com");

        Ok(())
    }
}
