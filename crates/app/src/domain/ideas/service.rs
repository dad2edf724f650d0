//! Ideas service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    clock::{Clock, system_clock},
    domain::{
        ideas::{
            data::{IdeaFilters, IdeaUpdate, IdeasPage, NewIdea, PageMetadata, validate_idea},
            errors::IdeasServiceError,
            records::{IdeaRecord, IdeaUuid},
            repository::IdeasRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Clone)]
pub struct Ideas {
    repository: Arc<dyn IdeasRepository>,
    clock: Clock,
}

impl Ideas {
    #[must_use]
    pub fn new(repository: Arc<dyn IdeasRepository>) -> Self {
        Self {
            repository,
            clock: system_clock(),
        }
    }
}

#[async_trait]
impl IdeasService for Ideas {
    async fn list(&self, filters: IdeaFilters) -> Result<IdeasPage, IdeasServiceError> {
        let (page, page_size) = (filters.page, filters.page_size);
        let query = filters.into_query()?;

        let (ideas, total) = self.repository.list_ideas(&query).await?;

        Ok(IdeasPage {
            ideas,
            metadata: PageMetadata::calculate(total, page, page_size),
        })
    }

    async fn get(&self, idea: IdeaUuid) -> Result<IdeaRecord, IdeasServiceError> {
        self.repository.get_idea(idea).await
    }

    async fn create(
        &self,
        author: UserUuid,
        idea: NewIdea,
    ) -> Result<IdeaRecord, IdeasServiceError> {
        validate_idea(&idea.title, &idea.description, &idea.category, &idea.tags)?;

        let record = self
            .repository
            .insert_idea(&IdeaRecord {
                uuid: IdeaUuid::new(),
                user_uuid: author,
                created_at: (self.clock)(),
                title: idea.title,
                description: idea.description,
                category: idea.category,
                tags: idea.tags,
                version: 1,
            })
            .await?;

        debug!(idea = %record.uuid, author = %author, "created idea");

        Ok(record)
    }

    async fn update(
        &self,
        idea: IdeaUuid,
        changes: IdeaUpdate,
    ) -> Result<IdeaRecord, IdeasServiceError> {
        let mut record = self.repository.get_idea(idea).await?;

        if let Some(title) = changes.title {
            record.title = title;
        }

        if let Some(description) = changes.description {
            record.description = description;
        }

        if let Some(category) = changes.category {
            record.category = category;
        }

        if let Some(tags) = changes.tags {
            record.tags = tags;
        }

        validate_idea(
            &record.title,
            &record.description,
            &record.category,
            &record.tags,
        )?;

        self.repository.update_idea(&record).await
    }

    async fn delete(&self, idea: IdeaUuid) -> Result<(), IdeasServiceError> {
        self.repository.delete_idea(idea).await?;

        debug!(idea = %idea, "deleted idea");

        Ok(())
    }
}

#[automock]
#[async_trait]
/// Idea CRUD and listing.
pub trait IdeasService: Send + Sync {
    /// Filtered, sorted, paged listing.
    async fn list(&self, filters: IdeaFilters) -> Result<IdeasPage, IdeasServiceError>;

    async fn get(&self, idea: IdeaUuid) -> Result<IdeaRecord, IdeasServiceError>;

    async fn create(&self, author: UserUuid, idea: NewIdea)
    -> Result<IdeaRecord, IdeasServiceError>;

    /// Apply `changes` over the stored idea; fails with `EditConflict` on a concurrent write.
    async fn update(
        &self,
        idea: IdeaUuid,
        changes: IdeaUpdate,
    ) -> Result<IdeaRecord, IdeasServiceError>;

    async fn delete(&self, idea: IdeaUuid) -> Result<(), IdeasServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::ideas::repository::MockIdeasRepository, testing::MemoryStore};

    use super::*;

    fn idea(title: &str, category: &str, tags: &[&str]) -> NewIdea {
        NewIdea {
            title: title.to_string(),
            description: format!("{title} in detail"),
            category: category.to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
        }
    }

    #[tokio::test]
    async fn create_then_get() -> TestResult {
        let store = MemoryStore::new();
        let author = store.seed_user("ivy@example.com", true).await;
        let ideas = Ideas::new(Arc::new(store));

        let created = ideas
            .create(author.uuid, idea("Solar kettles", "energy", &["solar"]))
            .await?;
        let fetched = ideas.get(created.uuid).await?;

        assert_eq!(fetched, created);
        assert_eq!(fetched.user_uuid, author.uuid);
        assert_eq!(fetched.version, 1);

        Ok(())
    }

    #[tokio::test]
    async fn invalid_idea_is_not_stored() -> TestResult {
        let mut repo = MockIdeasRepository::new();

        repo.expect_insert_idea().never();

        let result = Ideas::new(Arc::new(repo))
            .create(UserUuid::new(), idea("", "energy", &[]))
            .await;

        let Err(IdeasServiceError::FailedValidation(errors)) = &result else {
            panic!("expected validation failure, got {result:?}");
        };

        assert_eq!(errors.get("title"), Some("must be provided"));
        assert_eq!(errors.get("tags"), Some("must contain at least 1 tag"));

        Ok(())
    }

    #[tokio::test]
    async fn update_applies_only_supplied_fields() -> TestResult {
        let store = MemoryStore::new();
        let author = store.seed_user("jack@example.com", true).await;
        let ideas = Ideas::new(Arc::new(store));

        let created = ideas
            .create(author.uuid, idea("Rain barrels", "water", &["garden"]))
            .await?;

        let updated = ideas
            .update(
                created.uuid,
                IdeaUpdate {
                    category: Some("climate".to_string()),
                    ..IdeaUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.title, "Rain barrels");
        assert_eq!(updated.category, "climate");
        assert_eq!(updated.version, 2);

        Ok(())
    }

    #[tokio::test]
    async fn stale_version_is_an_edit_conflict() -> TestResult {
        let mut repo = MockIdeasRepository::new();
        let stored = IdeaRecord {
            uuid: IdeaUuid::new(),
            user_uuid: UserUuid::new(),
            created_at: jiff::Timestamp::UNIX_EPOCH,
            title: "Bike lanes".to_string(),
            description: "Everywhere".to_string(),
            category: "transport".to_string(),
            tags: vec!["cycling".to_string()],
            version: 3,
        };

        repo.expect_get_idea()
            .once()
            .return_once(move |_| Ok(stored));
        repo.expect_update_idea()
            .once()
            .return_once(|_| Err(IdeasServiceError::EditConflict));

        let result = Ideas::new(Arc::new(repo))
            .update(IdeaUuid::new(), IdeaUpdate::default())
            .await;

        assert!(matches!(result, Err(IdeasServiceError::EditConflict)));

        Ok(())
    }

    #[tokio::test]
    async fn list_filters_sorts_and_pages() -> TestResult {
        let store = MemoryStore::new();
        let author = store.seed_user("kim@example.com", true).await;
        let ideas = Ideas::new(Arc::new(store));

        for (title, category, tags) in [
            ("Community compost", "climate", &["garden", "waste"][..]),
            ("Bike repair cafe", "transport", &["cycling"][..]),
            ("Seed library", "Climate", &["garden"][..]),
        ] {
            ideas.create(author.uuid, idea(title, category, tags)).await?;
        }

        let page = ideas
            .list(IdeaFilters {
                category: "climate".to_string(),
                tags: vec!["garden".to_string()],
                page_size: 1,
                sort: "-title".to_string(),
                ..IdeaFilters::default()
            })
            .await?;

        assert_eq!(page.metadata.total_records, 2);
        assert_eq!(page.metadata.last_page, 2);
        assert_eq!(page.ideas.len(), 1);
        assert_eq!(page.ideas[0].title, "Seed library");

        Ok(())
    }

    #[tokio::test]
    async fn deleting_a_missing_idea_is_not_found() -> TestResult {
        let ideas = Ideas::new(Arc::new(MemoryStore::new()));

        let result = ideas.delete(IdeaUuid::new()).await;

        assert!(matches!(result, Err(IdeasServiceError::NotFound)));

        Ok(())
    }
}
