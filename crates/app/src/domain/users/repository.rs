//! Users Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as, query_scalar};

use crate::domain::users::{
    data::NewUser,
    errors::UsersRepositoryError,
    records::{PasswordHash, UserRecord, UserUuid},
};

const GET_USER_BY_EMAIL_SQL: &str = include_str!("sql/get_user_by_email.sql");
const INSERT_USER_SQL: &str = include_str!("sql/insert_user.sql");
const UPDATE_USER_SQL: &str = include_str!("sql/update_user.sql");

#[derive(Debug, Clone)]
/// PostgreSQL-backed users repository.
pub struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn get_by_email(&self, email: &str) -> Result<UserRecord, UsersRepositoryError> {
        query_as::<Postgres, UserRecord>(GET_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, UsersRepositoryError> {
        query_as::<Postgres, UserRecord>(INSERT_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.user_name)
            .bind(user.email)
            .bind(user.password_hash.as_str())
            .bind(user.user_type)
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn update(&self, user: &UserRecord) -> Result<UserRecord, UsersRepositoryError> {
        let version = query_scalar::<Postgres, i32>(UPDATE_USER_SQL)
            .bind(&user.user_name)
            .bind(&user.email)
            .bind(user.password_hash.as_str())
            .bind(user.activated)
            .bind(user.uuid.into_uuid())
            .bind(user.version)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(UsersRepositoryError::EditConflict)?;

        Ok(UserRecord {
            version,
            ..user.clone()
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            user_name: row.try_get("user_name")?,
            email: row.try_get("email")?,
            password_hash: PasswordHash::new(row.try_get("password_hash")?),
            user_type: row.try_get("user_type")?,
            activated: row.try_get("activated")?,
            version: row.try_get("version")?,
        })
    }
}

#[automock]
#[async_trait]
/// User persistence operations.
pub trait UsersRepository: Send + Sync {
    /// Finds a user by email address, ignoring case.
    async fn get_by_email(&self, email: &str) -> Result<UserRecord, UsersRepositoryError>;

    /// Inserts a new user; a taken email address is [`UsersRepositoryError::DuplicateEmail`].
    async fn insert(&self, user: NewUser) -> Result<UserRecord, UsersRepositoryError>;

    /// Writes `user` back if its version is still current and returns the bumped record.
    async fn update(&self, user: &UserRecord) -> Result<UserRecord, UsersRepositoryError>;
}
