//! State

use std::sync::Arc;

use openconnect_app::context::AppContext;

/// Shared per-process state injected into every request.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Deployment environment reported by the healthcheck.
    pub(crate) environment: String,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, environment: impl Into<String>) -> Self {
        Self {
            app,
            environment: environment.into(),
        }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, environment: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(app, environment))
    }
}
