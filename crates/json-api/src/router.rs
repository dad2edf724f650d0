//! App Router

use std::sync::Arc;

use salvo::{
    Router, Service,
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    trailing_slash::remove_slash,
};

use openconnect_app::domain::permissions::{IDEAS_READ, IDEAS_WRITE};

use crate::{
    auth::{RequirePermission, authenticate, require_activated, require_authenticated},
    catcher::json_catcher,
    healthcheck, ideas,
    limiter::{RateLimit, RateLimiter},
    observability::request_logging,
    recover::recover_panic,
    state::State,
    tokens, users,
};

/// Every route, behind the shared middleware chain.
///
/// Order matters: panics are recovered around everything, every request is
/// logged, limited clients are turned away before any token lookup, and the
/// per-route gates see the caller resolved by `authenticate`.
pub(crate) fn app_router(state: Arc<State>, limiter: Arc<RateLimiter>) -> Router {
    Router::new()
        .hoop(recover_panic)
        .hoop(request_logging)
        .hoop(remove_slash())
        .hoop(inject(state))
        .hoop(RateLimit::new(limiter))
        .hoop(authenticate)
        .push(
            Router::with_path("v1")
                .push(Router::with_path("healthcheck").get(healthcheck::handler))
                .push(users_router())
                .push(tokens_router())
                .push(ideas_router()),
        )
}

fn users_router() -> Router {
    Router::with_path("users")
        .post(users::register::handler)
        .push(Router::with_path("activated").put(users::activate::handler))
        .push(Router::with_path("password-reset").put(users::reset_password::handler))
        .push(
            Router::with_path("me")
                .hoop(require_activated)
                .get(users::me::handler),
        )
}

fn tokens_router() -> Router {
    Router::with_path("auth/tokens")
        .push(
            Router::with_path("authentication")
                .push(Router::new().post(tokens::authentication::handler))
                .push(
                    Router::new()
                        .hoop(require_authenticated)
                        .delete(tokens::revoke::handler),
                ),
        )
        .push(
            Router::with_path("password-reset-request").post(tokens::password_reset::handler),
        )
}

fn ideas_router() -> Router {
    let read = RequirePermission::new(IDEAS_READ);
    let write = RequirePermission::new(IDEAS_WRITE);

    Router::with_path("ideas")
        .push(Router::new().hoop(read).get(ideas::index::handler))
        .push(Router::new().hoop(write).post(ideas::create::handler))
        .push(
            Router::with_path("{idea}")
                .push(Router::new().hoop(read).get(ideas::get::handler))
                .push(
                    Router::new()
                        .hoop(write)
                        .patch(ideas::update::handler)
                        .delete(ideas::delete::handler),
                ),
        )
}

/// Serve `router` with framework errors rendered as JSON.
pub(crate) fn into_service(router: Router) -> Service {
    Service::new(router).catcher(json_catcher())
}

/// Attach the OpenAPI document and Swagger UI for `router`.
pub(crate) fn with_docs(router: Router) -> Router {
    let doc = OpenApi::new("OpenConnect API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
}
