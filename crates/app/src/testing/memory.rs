use std::{cmp::Ordering, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use tokio::sync::Mutex;

use crate::domain::{
    ideas::{
        IdeasRepository, IdeasServiceError,
        data::{IdeaQuery, SortField},
        records::{IdeaRecord, IdeaUuid},
    },
    permissions::{
        IDEAS_READ, IDEAS_WRITE, PermissionsRepository, errors::PermissionsRepositoryError,
        records::Permissions,
    },
    tokens::{
        TokenHash, TokensRepository, TokensServiceError,
        records::{TokenRecord, TokenScope},
    },
    users::{
        UsersRepository, UsersRepositoryError,
        data::{DEFAULT_USER_TYPE, NewUser},
        records::{PasswordHash, UserRecord, UserUuid},
    },
};

const KNOWN_PERMISSIONS: [&str; 2] = [IDEAS_READ, IDEAS_WRITE];

#[derive(Debug, Default)]
struct State {
    users: Vec<UserRecord>,
    tokens: Vec<TokenRecord>,
    grants: FxHashMap<UserUuid, Permissions>,
    ideas: Vec<IdeaRecord>,
}

impl State {
    fn email_taken(&self, email: &str, except: Option<UserUuid>) -> bool {
        self.users
            .iter()
            .any(|user| Some(user.uuid) != except && user.email.eq_ignore_ascii_case(email))
    }
}

/// One shared in-memory backing for every repository trait.
///
/// Clones share state, so a test can hand the same store to several services
/// and inspect it afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user directly, bypassing registration.
    pub async fn seed_user(&self, email: &str, activated: bool) -> UserRecord {
        let user = UserRecord {
            uuid: UserUuid::new(),
            created_at: Timestamp::now(),
            user_name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            password_hash: PasswordHash::new("$2b$04$not-a-real-hash".to_string()),
            user_type: DEFAULT_USER_TYPE.to_string(),
            activated,
            version: 1,
        };

        self.state.lock().await.users.push(user.clone());

        user
    }

    /// Every stored token, oldest first.
    pub async fn tokens(&self) -> Vec<TokenRecord> {
        self.state.lock().await.tokens.clone()
    }
}

#[async_trait]
impl UsersRepository for MemoryStore {
    async fn get_by_email(&self, email: &str) -> Result<UserRecord, UsersRepositoryError> {
        self.state
            .lock()
            .await
            .users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned()
            .ok_or(UsersRepositoryError::NotFound)
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, UsersRepositoryError> {
        let mut state = self.state.lock().await;

        if state.email_taken(&user.email, None) {
            return Err(UsersRepositoryError::DuplicateEmail);
        }

        let record = UserRecord {
            uuid: user.uuid,
            created_at: Timestamp::now(),
            user_name: user.user_name,
            email: user.email,
            password_hash: user.password_hash,
            user_type: user.user_type,
            activated: false,
            version: 1,
        };

        state.users.push(record.clone());

        Ok(record)
    }

    async fn update(&self, user: &UserRecord) -> Result<UserRecord, UsersRepositoryError> {
        let mut state = self.state.lock().await;

        if state.email_taken(&user.email, Some(user.uuid)) {
            return Err(UsersRepositoryError::DuplicateEmail);
        }

        let stored = state
            .users
            .iter_mut()
            .find(|stored| stored.uuid == user.uuid && stored.version == user.version)
            .ok_or(UsersRepositoryError::EditConflict)?;

        *stored = UserRecord {
            version: user.version + 1,
            ..user.clone()
        };

        Ok(stored.clone())
    }
}

#[async_trait]
impl TokensRepository for MemoryStore {
    async fn insert_token(&self, token: &TokenRecord) -> Result<(), TokensServiceError> {
        self.state.lock().await.tokens.push(token.clone());

        Ok(())
    }

    async fn find_user_for_token(
        &self,
        scope: TokenScope,
        hash: &TokenHash,
        now: Timestamp,
    ) -> Result<UserRecord, TokensServiceError> {
        let state = self.state.lock().await;

        let token = state
            .tokens
            .iter()
            .find(|token| token.hash == *hash && token.scope == scope && token.expiry > now)
            .ok_or(TokensServiceError::NotFound)?;

        state
            .users
            .iter()
            .find(|user| user.uuid == token.user_uuid)
            .cloned()
            .ok_or(TokensServiceError::NotFound)
    }

    async fn delete_all_for_user(
        &self,
        scope: TokenScope,
        user: UserUuid,
    ) -> Result<u64, TokensServiceError> {
        let mut state = self.state.lock().await;
        let before = state.tokens.len();

        state
            .tokens
            .retain(|token| !(token.scope == scope && token.user_uuid == user));

        Ok(u64::try_from(before - state.tokens.len()).unwrap_or_default())
    }
}

#[async_trait]
impl PermissionsRepository for MemoryStore {
    async fn all_for_user(&self, user: UserUuid) -> Result<Permissions, PermissionsRepositoryError> {
        Ok(self
            .state
            .lock()
            .await
            .grants
            .get(&user)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_for_user(
        &self,
        user: UserUuid,
        code: &str,
    ) -> Result<(), PermissionsRepositoryError> {
        if KNOWN_PERMISSIONS.contains(&code) {
            self.state
                .lock()
                .await
                .grants
                .entry(user)
                .or_default()
                .insert(code);
        }

        Ok(())
    }
}

fn matches_query(idea: &IdeaRecord, query: &IdeaQuery) -> bool {
    let title = idea.title.to_lowercase();
    let title_words: Vec<&str> = title.split_whitespace().collect();

    let title_matches = query
        .title
        .to_lowercase()
        .split_whitespace()
        .all(|word| title_words.contains(&word));

    let category_matches =
        query.category.is_empty() || idea.category.eq_ignore_ascii_case(&query.category);

    let tags_match = query.tags.iter().all(|tag| idea.tags.contains(tag));

    title_matches && category_matches && tags_match
}

fn compare_ideas(a: &IdeaRecord, b: &IdeaRecord, query: &IdeaQuery) -> Ordering {
    let ordering = match query.sort.field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Category => a.category.cmp(&b.category),
    };

    let ordering = if query.sort.descending {
        ordering.reverse()
    } else {
        ordering
    };

    ordering.then_with(|| a.uuid.cmp(&b.uuid))
}

#[async_trait]
impl IdeasRepository for MemoryStore {
    async fn list_ideas(
        &self,
        query: &IdeaQuery,
    ) -> Result<(Vec<IdeaRecord>, u64), IdeasServiceError> {
        let state = self.state.lock().await;

        let mut matching: Vec<IdeaRecord> = state
            .ideas
            .iter()
            .filter(|idea| matches_query(idea, query))
            .cloned()
            .collect();

        matching.sort_by(|a, b| compare_ideas(a, b, query));

        let total = u64::try_from(matching.len()).unwrap_or_default();
        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);

        let page = matching.into_iter().skip(offset).take(limit).collect();

        Ok((page, total))
    }

    async fn get_idea(&self, idea: IdeaUuid) -> Result<IdeaRecord, IdeasServiceError> {
        self.state
            .lock()
            .await
            .ideas
            .iter()
            .find(|stored| stored.uuid == idea)
            .cloned()
            .ok_or(IdeasServiceError::NotFound)
    }

    async fn insert_idea(&self, idea: &IdeaRecord) -> Result<IdeaRecord, IdeasServiceError> {
        let record = IdeaRecord {
            version: 1,
            ..idea.clone()
        };

        self.state.lock().await.ideas.push(record.clone());

        Ok(record)
    }

    async fn update_idea(&self, idea: &IdeaRecord) -> Result<IdeaRecord, IdeasServiceError> {
        let mut state = self.state.lock().await;

        let stored = state
            .ideas
            .iter_mut()
            .find(|stored| stored.uuid == idea.uuid && stored.version == idea.version)
            .ok_or(IdeasServiceError::EditConflict)?;

        *stored = IdeaRecord {
            version: idea.version + 1,
            ..idea.clone()
        };

        Ok(stored.clone())
    }

    async fn delete_idea(&self, idea: IdeaUuid) -> Result<(), IdeasServiceError> {
        let mut state = self.state.lock().await;
        let before = state.ideas.len();

        state.ideas.retain(|stored| stored.uuid != idea);

        if state.ideas.len() == before {
            return Err(IdeasServiceError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn unknown_permission_codes_are_ignored() -> TestResult {
        let store = MemoryStore::new();
        let user = store.seed_user("quinn@example.com", true).await;

        store.add_for_user(user.uuid, "ideas:admin").await?;
        store.add_for_user(user.uuid, IDEAS_READ).await?;

        assert_eq!(store.all_for_user(user.uuid).await?.sorted(), vec![IDEAS_READ]);

        Ok(())
    }
}
