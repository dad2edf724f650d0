//! Ideas Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    ideas::{
        data::IdeaQuery,
        errors::IdeasServiceError,
        records::{IdeaRecord, IdeaUuid},
    },
    users::records::UserUuid,
};

const LIST_IDEAS_SQL: &str = include_str!("sql/list_ideas.sql");
const GET_IDEA_SQL: &str = include_str!("sql/get_idea.sql");
const INSERT_IDEA_SQL: &str = include_str!("sql/insert_idea.sql");
const UPDATE_IDEA_SQL: &str = include_str!("sql/update_idea.sql");
const DELETE_IDEA_SQL: &str = include_str!("sql/delete_idea.sql");

#[derive(Debug, Clone)]
/// PostgreSQL-backed ideas repository.
pub struct PgIdeasRepository {
    pool: PgPool,
}

impl PgIdeasRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdeasRepository for PgIdeasRepository {
    async fn list_ideas(
        &self,
        filter: &IdeaQuery,
    ) -> Result<(Vec<IdeaRecord>, u64), IdeasServiceError> {
        let sql = LIST_IDEAS_SQL.replace("{order_by}", filter.sort.order_by());

        let rows = query(&sql)
            .bind(&filter.title)
            .bind(&filter.category)
            .bind(&filter.tags)
            .bind(i64::from(filter.limit))
            .bind(i64::try_from(filter.offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        let mut total: u64 = 0;
        let mut ideas = Vec::with_capacity(rows.len());

        for row in &rows {
            total = u64::try_from(row.try_get::<i64, _>("total")?).unwrap_or_default();
            ideas.push(IdeaRecord::from_row(row)?);
        }

        Ok((ideas, total))
    }

    async fn get_idea(&self, idea: IdeaUuid) -> Result<IdeaRecord, IdeasServiceError> {
        query_as::<Postgres, IdeaRecord>(GET_IDEA_SQL)
            .bind(idea.into_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn insert_idea(&self, idea: &IdeaRecord) -> Result<IdeaRecord, IdeasServiceError> {
        query_as::<Postgres, IdeaRecord>(INSERT_IDEA_SQL)
            .bind(idea.uuid.into_uuid())
            .bind(idea.user_uuid.into_uuid())
            .bind(&idea.title)
            .bind(&idea.description)
            .bind(&idea.category)
            .bind(&idea.tags)
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn update_idea(&self, idea: &IdeaRecord) -> Result<IdeaRecord, IdeasServiceError> {
        let version = query_scalar::<Postgres, i32>(UPDATE_IDEA_SQL)
            .bind(&idea.title)
            .bind(&idea.description)
            .bind(&idea.category)
            .bind(&idea.tags)
            .bind(idea.uuid.into_uuid())
            .bind(idea.version)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(IdeasServiceError::EditConflict)?;

        Ok(IdeaRecord {
            version,
            ..idea.clone()
        })
    }

    async fn delete_idea(&self, idea: IdeaUuid) -> Result<(), IdeasServiceError> {
        let rows_affected = query(DELETE_IDEA_SQL)
            .bind(idea.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(IdeasServiceError::NotFound);
        }

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for IdeaRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: IdeaUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            tags: row.try_get("tags")?,
            version: row.try_get("version")?,
        })
    }
}

#[automock]
#[async_trait]
/// Idea persistence operations.
pub trait IdeasRepository: Send + Sync {
    /// One page of matching ideas plus the total number of matches.
    async fn list_ideas(
        &self,
        filter: &IdeaQuery,
    ) -> Result<(Vec<IdeaRecord>, u64), IdeasServiceError>;

    async fn get_idea(&self, idea: IdeaUuid) -> Result<IdeaRecord, IdeasServiceError>;

    async fn insert_idea(&self, idea: &IdeaRecord) -> Result<IdeaRecord, IdeasServiceError>;

    /// Writes `idea` back if its version is still current.
    async fn update_idea(&self, idea: &IdeaRecord) -> Result<IdeaRecord, IdeasServiceError>;

    async fn delete_idea(&self, idea: IdeaUuid) -> Result<(), IdeasServiceError>;
}
