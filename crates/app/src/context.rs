//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    background::BackgroundTasks,
    database::{self, DatabaseSettings},
    domain::{
        accounts::{Accounts, AccountsService, data::AccountsSettings},
        ideas::{Ideas, IdeasService, PgIdeasRepository},
        permissions::{PermissionsRepository, PgPermissionsRepository},
        tokens::{PgTokensRepository, Tokens, TokensService},
        users::PgUsersRepository,
    },
    mailer::Mailer,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Everything a delivery layer needs, behind trait objects.
#[derive(Clone)]
pub struct AppContext {
    pub tokens: Arc<dyn TokensService>,
    pub permissions: Arc<dyn PermissionsRepository>,
    pub accounts: Arc<dyn AccountsService>,
    pub ideas: Arc<dyn IdeasService>,

    /// Detached work (mail delivery) that shutdown should wait for.
    pub background: BackgroundTasks,
}

impl AppContext {
    /// Build application context on top of a fresh connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn connect(
        settings: &DatabaseSettings,
        mailer: Arc<dyn Mailer>,
        accounts: AccountsSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(settings)
            .await
            .map_err(AppInitError::Database)?;

        let tokens: Arc<dyn TokensService> =
            Arc::new(Tokens::new(Arc::new(PgTokensRepository::new(pool.clone()))));
        let permissions: Arc<dyn PermissionsRepository> =
            Arc::new(PgPermissionsRepository::new(pool.clone()));
        let background = BackgroundTasks::new();

        let accounts = Accounts::new(
            Arc::new(PgUsersRepository::new(pool.clone())),
            Arc::clone(&tokens),
            Arc::clone(&permissions),
            mailer,
            background.clone(),
            accounts,
        );

        Ok(Self {
            tokens,
            permissions,
            accounts: Arc::new(accounts),
            ideas: Arc::new(Ideas::new(Arc::new(PgIdeasRepository::new(pool)))),
            background,
        })
    }
}
