//! Delete Idea Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    extensions::*,
    ideas::errors::into_api_error,
    state::State,
    users::models::MessageResponse,
};

/// Delete Idea Handler
#[endpoint(
    tags("ideas"),
    summary = "Delete Idea",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    idea: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .ideas
        .delete(idea.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(MessageResponse::new("idea deleted successfully")))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use openconnect_app::domain::ideas::{IdeasServiceError, records::IdeaUuid};

    use crate::test_helpers::{Mocks, activated_caller, service_as};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service_as(
            activated_caller(),
            mocks,
            Router::with_path("v1/ideas/{idea}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_idea_returns_message() -> TestResult {
        let uuid = IdeaUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .ideas
            .expect_delete()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(|_| Ok(()));

        let mut res = TestClient::delete(format!("http://example.com/v1/ideas/{uuid}"))
            .send(&make_service(mocks))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "idea deleted successfully");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_idea_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .ideas
            .expect_delete()
            .once()
            .return_once(|_| Err(IdeasServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/v1/ideas/{}", IdeaUuid::new()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
