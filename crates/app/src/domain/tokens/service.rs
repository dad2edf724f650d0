//! Tokens service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::SignedDuration;
use mockall::automock;
use tracing::debug;

use crate::{
    clock::{Clock, system_clock},
    domain::{
        tokens::{
            errors::TokensServiceError,
            plaintext::{TokenHash, TokenPlaintext},
            records::{IssuedToken, TokenRecord, TokenScope},
            repository::TokensRepository,
        },
        users::records::{UserRecord, UserUuid},
    },
};

/// Lifetime of a login token.
pub const AUTHENTICATION_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24);

/// Lifetime of the token mailed out at registration.
pub const ACTIVATION_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(3 * 24);

/// Lifetime of a password-reset token.
pub const PASSWORD_RESET_TOKEN_TTL: SignedDuration = SignedDuration::from_mins(45);

/// Issues, resolves, and revokes scoped bearer tokens.
#[derive(Clone)]
pub struct Tokens {
    repository: Arc<dyn TokensRepository>,
    clock: Clock,
}

impl Tokens {
    #[must_use]
    pub fn new(repository: Arc<dyn TokensRepository>) -> Self {
        Self::with_clock(repository, system_clock())
    }

    #[must_use]
    pub fn with_clock(repository: Arc<dyn TokensRepository>, clock: Clock) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl TokensService for Tokens {
    async fn issue(
        &self,
        user: UserUuid,
        ttl: SignedDuration,
        scope: TokenScope,
    ) -> Result<IssuedToken, TokensServiceError> {
        let expiry = (self.clock)()
            .checked_add(ttl)
            .map_err(TokensServiceError::Expiry)?;

        let plaintext = TokenPlaintext::generate();

        self.repository
            .insert_token(&TokenRecord {
                hash: plaintext.hash(),
                user_uuid: user,
                scope,
                expiry,
            })
            .await?;

        debug!(user = %user, scope = %scope, "issued token");

        Ok(IssuedToken {
            plaintext,
            scope,
            expiry,
        })
    }

    async fn lookup_user(
        &self,
        scope: TokenScope,
        plaintext: &str,
    ) -> Result<UserRecord, TokensServiceError> {
        self.repository
            .find_user_for_token(scope, &TokenHash::of(plaintext), (self.clock)())
            .await
    }

    async fn revoke_all(&self, scope: TokenScope, user: UserUuid) -> Result<(), TokensServiceError> {
        let revoked = self.repository.delete_all_for_user(scope, user).await?;

        debug!(user = %user, scope = %scope, revoked, "revoked tokens");

        Ok(())
    }
}

#[automock]
#[async_trait]
/// Scoped bearer token operations.
pub trait TokensService: Send + Sync {
    /// Mint a token for `user` valid for `ttl`; the plaintext is only available here.
    async fn issue(
        &self,
        user: UserUuid,
        ttl: SignedDuration,
        scope: TokenScope,
    ) -> Result<IssuedToken, TokensServiceError>;

    /// Resolve a live `scope` token to its owner.
    async fn lookup_user(
        &self,
        scope: TokenScope,
        plaintext: &str,
    ) -> Result<UserRecord, TokensServiceError>;

    /// Delete every `scope` token of `user`. Idempotent.
    async fn revoke_all(&self, scope: TokenScope, user: UserUuid) -> Result<(), TokensServiceError>;
}
