//! Per-route access gates.
//!
//! Each gate runs after [`super::authenticate`] and either passes the request
//! on or ends it with the matching [`ApiError`]. Stricter gates run the weaker
//! checks first, so an anonymous caller always gets a 401 before any 403.

use std::sync::Arc;

use salvo::prelude::*;

use openconnect_app::domain::users::records::UserRecord;

use crate::{auth::Caller, errors::ApiError, extensions::*, state::State};

fn authenticated(caller: &Caller) -> Result<&UserRecord, ApiError> {
    caller.user().ok_or(ApiError::AuthenticationRequired)
}

fn activated(caller: &Caller) -> Result<&UserRecord, ApiError> {
    let user = authenticated(caller)?;

    if user.activated {
        Ok(user)
    } else {
        Err(ApiError::InactiveAccount)
    }
}

async fn permitted(depot: &Depot, code: &str) -> Result<(), ApiError> {
    let user = activated(depot.caller())?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let permissions = state
        .app
        .permissions
        .all_for_user(user.uuid)
        .await
        .or_500("failed to load permissions")?;

    if permissions.includes(code) {
        Ok(())
    } else {
        Err(ApiError::NotPermitted)
    }
}

async fn pass_or_reject(
    verdict: Result<(), ApiError>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match verdict {
        Ok(()) => {
            ctrl.call_next(req, depot, res).await;
        }
        Err(rejection) => {
            res.render(rejection);
            ctrl.skip_rest();
        }
    }
}

/// Admit any authenticated caller.
#[handler]
pub(crate) async fn require_authenticated(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let verdict = authenticated(depot.caller()).map(|_user| ());

    pass_or_reject(verdict, req, depot, res, ctrl).await;
}

/// Admit authenticated callers whose account is activated.
#[handler]
pub(crate) async fn require_activated(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let verdict = activated(depot.caller()).map(|_user| ());

    pass_or_reject(verdict, req, depot, res, ctrl).await;
}

/// Admit activated callers holding `code`.
///
/// Permissions are read from the store on every request, so a grant takes
/// effect immediately.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequirePermission {
    code: &'static str,
}

impl RequirePermission {
    pub(crate) const fn new(code: &'static str) -> Self {
        Self { code }
    }
}

#[handler]
impl RequirePermission {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let verdict = permitted(depot, self.code).await;

        pass_or_reject(verdict, req, depot, res, ctrl).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use openconnect_app::domain::permissions::{
        IDEAS_READ, IDEAS_WRITE, Permissions, PermissionsRepositoryError,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, make_user, service_as};

    use super::*;

    #[handler]
    async fn admitted() -> &'static str {
        "admitted"
    }

    async fn call(service: &Service) -> (Option<StatusCode>, Value) {
        let mut res = TestClient::get("http://example.com").send(service).await;
        let body = res.take_json().await.unwrap_or(Value::Null);

        (res.status_code, body)
    }

    #[tokio::test]
    async fn anonymous_callers_need_authentication() -> TestResult {
        for gate in [
            Router::new().hoop(require_authenticated).get(admitted),
            Router::new().hoop(require_activated).get(admitted),
            Router::new()
                .hoop(RequirePermission::new(IDEAS_READ))
                .get(admitted),
        ] {
            let service = service_as(Caller::Anonymous, Mocks::default(), gate);
            let (status, body) = call(&service).await;

            assert_eq!(status, Some(StatusCode::UNAUTHORIZED));
            assert_eq!(body["error"], "you must be authenticated to access this resource");
        }

        Ok(())
    }

    #[tokio::test]
    async fn inactive_accounts_are_forbidden_before_permissions_load() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.permissions.expect_all_for_user().never();

        let service = service_as(
            Caller::User(make_user("ina@example.com", false)),
            mocks,
            Router::new()
                .hoop(RequirePermission::new(IDEAS_READ))
                .get(admitted),
        );

        let (status, body) = call(&service).await;

        assert_eq!(status, Some(StatusCode::FORBIDDEN));
        assert_eq!(
            body["error"],
            "your user account must be activated before you can access this resource"
        );

        Ok(())
    }

    #[tokio::test]
    async fn inactive_accounts_pass_the_authentication_gate() -> TestResult {
        let service = service_as(
            Caller::User(make_user("ina@example.com", false)),
            Mocks::default(),
            Router::new().hoop(require_authenticated).get(admitted),
        );

        let mut res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "admitted");

        Ok(())
    }

    #[tokio::test]
    async fn missing_permission_is_not_permitted() -> TestResult {
        let user = make_user("rita@example.com", true);
        let uuid = user.uuid;

        let mut mocks = Mocks::default();

        mocks
            .permissions
            .expect_all_for_user()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(|_| Ok([IDEAS_READ].into_iter().collect::<Permissions>()));

        let service = service_as(
            Caller::User(user),
            mocks,
            Router::new()
                .hoop(RequirePermission::new(IDEAS_WRITE))
                .get(admitted),
        );

        let (status, body) = call(&service).await;

        assert_eq!(status, Some(StatusCode::FORBIDDEN));
        assert_eq!(
            body["error"],
            "your user account does not have the necessary permissions to access this resource"
        );

        Ok(())
    }

    #[tokio::test]
    async fn held_permission_is_admitted() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .permissions
            .expect_all_for_user()
            .once()
            .return_once(|_| Ok([IDEAS_READ, IDEAS_WRITE].into_iter().collect::<Permissions>()));

        let service = service_as(
            Caller::User(make_user("wes@example.com", true)),
            mocks,
            Router::new()
                .hoop(RequirePermission::new(IDEAS_WRITE))
                .get(admitted),
        );

        let mut res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "admitted");

        Ok(())
    }

    #[tokio::test]
    async fn permission_store_failure_is_a_server_error() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .permissions
            .expect_all_for_user()
            .once()
            .return_once(|_| {
                Err(PermissionsRepositoryError::Sql(sqlx::Error::PoolTimedOut))
            });

        let service = service_as(
            Caller::User(make_user("sam@example.com", true)),
            mocks,
            Router::new()
                .hoop(RequirePermission::new(IDEAS_READ))
                .get(admitted),
        );

        let (status, _body) = call(&service).await;

        assert_eq!(status, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[derive(Debug, Clone, Default)]
    struct Counted(Arc<AtomicUsize>);

    #[handler]
    impl Counted {
        async fn handle(&self) -> &'static str {
            self.0.fetch_add(1, Ordering::SeqCst);

            "admitted"
        }
    }

    #[tokio::test]
    async fn activation_gate_runs_before_the_handler() -> TestResult {
        let counted = Counted::default();
        let calls = Arc::clone(&counted.0);

        let inactive = service_as(
            Caller::User(make_user("ina@example.com", false)),
            Mocks::default(),
            Router::new().hoop(require_activated).get(counted.clone()),
        );

        let (status, body) = call(&inactive).await;

        assert_eq!(status, Some(StatusCode::FORBIDDEN));
        assert_eq!(
            body["error"],
            "your user account must be activated before you can access this resource"
        );

        let anonymous = service_as(
            Caller::Anonymous,
            Mocks::default(),
            Router::new().hoop(require_activated).get(counted),
        );

        let (status, _body) = call(&anonymous).await;

        assert_eq!(status, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(calls.load(Ordering::SeqCst), 0, "the handler must not run");

        Ok(())
    }
}
