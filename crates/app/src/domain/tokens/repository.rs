//! Tokens Repository

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{PgPool, Postgres, query, query_as};

use crate::domain::{
    tokens::{
        errors::TokensServiceError,
        plaintext::TokenHash,
        records::{TokenRecord, TokenScope},
    },
    users::records::{UserRecord, UserUuid},
};

const INSERT_TOKEN_SQL: &str = include_str!("sql/insert_token.sql");
const FIND_USER_FOR_TOKEN_SQL: &str = include_str!("sql/find_user_for_token.sql");
const DELETE_ALL_FOR_USER_SQL: &str = include_str!("sql/delete_all_for_user.sql");

#[derive(Debug, Clone)]
/// PostgreSQL-backed token store.
pub struct PgTokensRepository {
    pool: PgPool,
}

impl PgTokensRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokensRepository for PgTokensRepository {
    async fn insert_token(&self, token: &TokenRecord) -> Result<(), TokensServiceError> {
        query(INSERT_TOKEN_SQL)
            .bind(token.hash.as_bytes().as_slice())
            .bind(token.user_uuid.into_uuid())
            .bind(SqlxTimestamp::from(token.expiry))
            .bind(token.scope.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_user_for_token(
        &self,
        scope: TokenScope,
        hash: &TokenHash,
        now: Timestamp,
    ) -> Result<UserRecord, TokensServiceError> {
        query_as::<Postgres, UserRecord>(FIND_USER_FOR_TOKEN_SQL)
            .bind(hash.as_bytes().as_slice())
            .bind(scope.as_str())
            .bind(SqlxTimestamp::from(now))
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn delete_all_for_user(
        &self,
        scope: TokenScope,
        user: UserUuid,
    ) -> Result<u64, TokensServiceError> {
        let rows_affected = query(DELETE_ALL_FOR_USER_SQL)
            .bind(scope.as_str())
            .bind(user.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

#[automock]
#[async_trait]
/// Token persistence. Only hashes ever reach this layer.
pub trait TokensRepository: Send + Sync {
    async fn insert_token(&self, token: &TokenRecord) -> Result<(), TokensServiceError>;

    /// Returns the owner of the token with `hash` and `scope` whose expiry is after `now`.
    async fn find_user_for_token(
        &self,
        scope: TokenScope,
        hash: &TokenHash,
        now: Timestamp,
    ) -> Result<UserRecord, TokensServiceError>;

    /// Deletes every `scope` token belonging to `user`, returning how many went.
    async fn delete_all_for_user(
        &self,
        scope: TokenScope,
        user: UserUuid,
    ) -> Result<u64, TokensServiceError>;
}
