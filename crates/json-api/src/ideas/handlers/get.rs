//! Get Idea Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    extensions::*,
    ideas::{errors::into_api_error, models::IdeaEnvelope},
    state::State,
};

/// Get Idea Handler
#[endpoint(
    tags("ideas"),
    summary = "Get Idea",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    idea: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<IdeaEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let idea = state
        .app
        .ideas
        .get(idea.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(idea.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use openconnect_app::domain::{
        ideas::{IdeasServiceError, records::IdeaUuid},
        users::records::UserUuid,
    };

    use crate::test_helpers::{Mocks, activated_caller, make_idea, service_as};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service_as(
            activated_caller(),
            mocks,
            Router::with_path("v1/ideas/{idea}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_idea_returns_200() -> TestResult {
        let uuid = IdeaUuid::new();
        let author = UserUuid::new();
        let idea = make_idea(uuid, author);

        let mut mocks = Mocks::default();

        mocks
            .ideas
            .expect_get()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(move |_| Ok(idea));

        let mut res = TestClient::get(format!("http://example.com/v1/ideas/{uuid}"))
            .send(&make_service(mocks))
            .await;

        let body: IdeaEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.idea.id, uuid.into_uuid());
        assert_eq!(body.idea.submitted_by, author.into_uuid());
        assert_eq!(body.idea.tags, vec!["garden", "waste"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_idea_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .ideas
            .expect_get()
            .once()
            .return_once(|_| Err(IdeasServiceError::NotFound));

        let mut res = TestClient::get(format!("http://example.com/v1/ideas/{}", IdeaUuid::new()))
            .send(&make_service(mocks))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body["error"], "the requested resource could not be found");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_with_malformed_uuid_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.ideas.expect_get().never();

        let res = TestClient::get("http://example.com/v1/ideas/not-a-uuid")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
