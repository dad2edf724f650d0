//! Permissions Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, Postgres, query, query_scalar};

use crate::domain::{
    permissions::{errors::PermissionsRepositoryError, records::Permissions},
    users::records::UserUuid,
};

const ALL_FOR_USER_SQL: &str = include_str!("sql/all_for_user.sql");
const ADD_FOR_USER_SQL: &str = include_str!("sql/add_for_user.sql");

#[derive(Debug, Clone)]
/// PostgreSQL-backed permission store.
pub struct PgPermissionsRepository {
    pool: PgPool,
}

impl PgPermissionsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionsRepository for PgPermissionsRepository {
    async fn all_for_user(&self, user: UserUuid) -> Result<Permissions, PermissionsRepositoryError> {
        let codes = query_scalar::<Postgres, String>(ALL_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&self.pool)
            .await?;

        Ok(codes.into_iter().collect())
    }

    async fn add_for_user(
        &self,
        user: UserUuid,
        code: &str,
    ) -> Result<(), PermissionsRepositoryError> {
        query(ADD_FOR_USER_SQL)
            .bind(user.into_uuid())
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
/// Set-valued permission storage.
pub trait PermissionsRepository: Send + Sync {
    /// Every code `user` holds; an empty set when none.
    async fn all_for_user(&self, user: UserUuid) -> Result<Permissions, PermissionsRepositoryError>;

    /// Grant `code` to `user`. Granting an already-held code is a no-op.
    async fn add_for_user(&self, user: UserUuid, code: &str)
    -> Result<(), PermissionsRepositoryError>;
}
