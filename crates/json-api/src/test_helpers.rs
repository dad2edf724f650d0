//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use openconnect_app::{
    background::BackgroundTasks,
    context::AppContext,
    domain::{
        accounts::MockAccountsService,
        ideas::{
            MockIdeasService,
            records::{IdeaRecord, IdeaUuid},
        },
        permissions::MockPermissionsRepository,
        tokens::MockTokensService,
        users::records::{PasswordHash, UserRecord, UserUuid},
    },
};

use crate::{auth::Caller, extensions::*, state::State};

/// One mock per application service.
///
/// Unconfigured mocks reject every call, so a test only sets up the
/// expectations it relies on.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) tokens: MockTokensService,
    pub(crate) permissions: MockPermissionsRepository,
    pub(crate) accounts: MockAccountsService,
    pub(crate) ideas: MockIdeasService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::shared(
            AppContext {
                tokens: Arc::new(self.tokens),
                permissions: Arc::new(self.permissions),
                accounts: Arc::new(self.accounts),
                ideas: Arc::new(self.ideas),
                background: BackgroundTasks::new(),
            },
            "testing",
        )
    }
}

/// Stands in for the authentication middleware.
#[derive(Debug, Clone)]
pub(crate) struct InjectCaller(pub(crate) Caller);

#[handler]
impl InjectCaller {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_caller(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}

/// `route` with state injected and no caller resolved.
pub(crate) fn service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .push(route),
    )
}

/// `route` with state injected and `caller` already resolved.
pub(crate) fn service_as(caller: Caller, mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(InjectCaller(caller))
            .push(route),
    )
}

pub(crate) fn make_user(email: &str, activated: bool) -> UserRecord {
    UserRecord {
        uuid: UserUuid::new(),
        created_at: Timestamp::UNIX_EPOCH,
        user_name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: PasswordHash::new("$2b$04$not-a-real-hash".to_string()),
        user_type: "normal".to_string(),
        activated,
        version: 1,
    }
}

/// An activated caller; the route's permission gates are not in play.
pub(crate) fn activated_caller() -> Caller {
    Caller::User(make_user("active@example.com", true))
}

pub(crate) fn make_idea(uuid: IdeaUuid, author: UserUuid) -> IdeaRecord {
    IdeaRecord {
        uuid,
        user_uuid: author,
        created_at: Timestamp::UNIX_EPOCH,
        title: "Community compost".to_string(),
        description: "Shared bins for every street".to_string(),
        category: "climate".to_string(),
        tags: vec!["garden".to_string(), "waste".to_string()],
        version: 1,
    }
}
