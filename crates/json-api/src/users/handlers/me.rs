//! Current User Handler

use salvo::prelude::*;

use crate::{errors::ApiError, extensions::*, users::models::UserEnvelope};

/// Current User Handler
///
/// Returns the profile of the authenticated caller.
#[endpoint(tags("users"), summary = "Current User", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserEnvelope>, ApiError> {
    let user = depot
        .caller()
        .user()
        .cloned()
        .ok_or(ApiError::AuthenticationRequired)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        auth::Caller,
        test_helpers::{Mocks, make_user, service_as},
    };

    use super::*;

    #[tokio::test]
    async fn test_me_returns_the_caller() -> TestResult {
        let user = make_user("pia@example.com", true);
        let uuid = user.uuid;

        let service = service_as(
            Caller::User(user),
            Mocks::default(),
            Router::with_path("v1/users/me").get(handler),
        );

        let mut res = TestClient::get("http://example.com/v1/users/me")
            .send(&service)
            .await;

        let body: UserEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.user.id, uuid.into_uuid());
        assert_eq!(body.user.email, "pia@example.com");

        Ok(())
    }
}
