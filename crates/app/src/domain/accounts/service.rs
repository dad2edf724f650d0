//! Accounts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{error, info};

use crate::{
    background::BackgroundTasks,
    domain::{
        accounts::{
            data::{AccountsSettings, Registration},
            errors::AccountsServiceError,
        },
        permissions::{IDEAS_READ, IDEAS_WRITE, PermissionsRepository},
        tokens::{
            ACTIVATION_TOKEN_TTL, AUTHENTICATION_TOKEN_TTL, PASSWORD_RESET_TOKEN_TTL,
            TokensService, TokensServiceError, records::IssuedToken, records::TokenScope,
            validate_plaintext,
        },
        users::{
            UsersRepository, UsersRepositoryError,
            data::{DEFAULT_USER_TYPE, NewUser},
            password::{hash_password, verify_password},
            records::{UserRecord, UserUuid},
        },
    },
    mailer::{MailTemplate, Mailer},
    validation::{FieldErrors, validate_email, validate_password_plaintext},
};

/// Account lifecycle built from the user, token, and permission stores.
#[derive(Clone)]
pub struct Accounts {
    users: Arc<dyn UsersRepository>,
    tokens: Arc<dyn TokensService>,
    permissions: Arc<dyn PermissionsRepository>,
    mailer: Arc<dyn Mailer>,
    background: BackgroundTasks,
    settings: AccountsSettings,
}

impl Accounts {
    #[must_use]
    pub fn new(
        users: Arc<dyn UsersRepository>,
        tokens: Arc<dyn TokensService>,
        permissions: Arc<dyn PermissionsRepository>,
        mailer: Arc<dyn Mailer>,
        background: BackgroundTasks,
        settings: AccountsSettings,
    ) -> Self {
        Self {
            users,
            tokens,
            permissions,
            mailer,
            background,
            settings,
        }
    }

    fn send_later(&self, recipient: String, template: MailTemplate) {
        let mailer = Arc::clone(&self.mailer);

        self.background.spawn("send mail", async move {
            if let Err(source) = mailer.send(&recipient, &template).await {
                error!(template = template.name(), "failed to send mail: {source}");
            }
        });
    }

    async fn lookup_by_token(
        &self,
        scope: TokenScope,
        token: &str,
        rejection: &str,
    ) -> Result<UserRecord, AccountsServiceError> {
        match self.tokens.lookup_user(scope, token).await {
            Ok(user) => Ok(user),
            Err(TokensServiceError::NotFound) => {
                Err(AccountsServiceError::field("token", rejection))
            }
            Err(error) => Err(error.into()),
        }
    }
}

#[async_trait]
impl AccountsService for Accounts {
    async fn register(
        &self,
        registration: Registration,
    ) -> Result<UserRecord, AccountsServiceError> {
        registration.validate()?;

        let password_hash =
            hash_password(&registration.password, self.settings.bcrypt_cost).await?;

        let user = self
            .users
            .insert(NewUser {
                uuid: UserUuid::new(),
                user_name: registration.user_name,
                email: registration.email,
                password_hash,
                user_type: DEFAULT_USER_TYPE.to_string(),
            })
            .await?;

        self.permissions.add_for_user(user.uuid, IDEAS_READ).await?;

        let activation = self
            .tokens
            .issue(user.uuid, ACTIVATION_TOKEN_TTL, TokenScope::Activation)
            .await?;

        self.send_later(
            user.email.clone(),
            MailTemplate::UserWelcome {
                user_name: user.user_name.clone(),
                activation_token: activation.plaintext.as_str().to_string(),
                frontend_url: self.settings.frontend_url.clone(),
            },
        );

        info!(user = %user.uuid, "registered user");

        Ok(user)
    }

    async fn activate(&self, token: &str) -> Result<UserRecord, AccountsServiceError> {
        let mut errors = FieldErrors::new();

        validate_plaintext(&mut errors, token);

        errors.into_result()?;

        let user = self
            .lookup_by_token(
                TokenScope::Activation,
                token,
                "invalid or expired activation token",
            )
            .await?;

        let user = self
            .users
            .update(&UserRecord {
                activated: true,
                ..user
            })
            .await?;

        self.permissions.add_for_user(user.uuid, IDEAS_WRITE).await?;

        self.tokens
            .revoke_all(TokenScope::Activation, user.uuid)
            .await?;

        info!(user = %user.uuid, "activated user");

        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AccountsServiceError> {
        let mut errors = FieldErrors::new();

        validate_email(&mut errors, email);
        validate_password_plaintext(&mut errors, password);

        errors.into_result()?;

        let user = match self.users.get_by_email(email).await {
            Ok(user) => user,
            Err(UsersRepositoryError::NotFound) => {
                return Err(AccountsServiceError::InvalidCredentials);
            }
            Err(error) => return Err(error.into()),
        };

        if !verify_password(password, &user.password_hash).await? {
            return Err(AccountsServiceError::InvalidCredentials);
        }

        Ok(self
            .tokens
            .issue(
                user.uuid,
                AUTHENTICATION_TOKEN_TTL,
                TokenScope::Authentication,
            )
            .await?)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AccountsServiceError> {
        let mut errors = FieldErrors::new();

        validate_email(&mut errors, email);

        errors.into_result()?;

        let user = match self.users.get_by_email(email).await {
            Ok(user) => user,
            Err(UsersRepositoryError::NotFound) => {
                return Err(AccountsServiceError::field(
                    "email",
                    "no matching email address found",
                ));
            }
            Err(error) => return Err(error.into()),
        };

        if !user.activated {
            return Err(AccountsServiceError::field(
                "email",
                "user account must be activated",
            ));
        }

        let reset = self
            .tokens
            .issue(
                user.uuid,
                PASSWORD_RESET_TOKEN_TTL,
                TokenScope::PasswordReset,
            )
            .await?;

        self.send_later(
            user.email,
            MailTemplate::PasswordReset {
                reset_token: reset.plaintext.as_str().to_string(),
                frontend_url: self.settings.frontend_url.clone(),
            },
        );

        Ok(())
    }

    async fn reset_password(&self, token: &str, password: &str) -> Result<(), AccountsServiceError> {
        let mut errors = FieldErrors::new();

        validate_password_plaintext(&mut errors, password);
        validate_plaintext(&mut errors, token);

        errors.into_result()?;

        let user = self
            .lookup_by_token(
                TokenScope::PasswordReset,
                token,
                "invalid or expired password reset token",
            )
            .await?;

        let password_hash = hash_password(password, self.settings.bcrypt_cost).await?;

        let user = self
            .users
            .update(&UserRecord {
                password_hash,
                ..user
            })
            .await?;

        self.tokens
            .revoke_all(TokenScope::PasswordReset, user.uuid)
            .await?;

        info!(user = %user.uuid, "reset password");

        Ok(())
    }
}

#[automock]
#[async_trait]
/// Account lifecycle operations.
pub trait AccountsService: Send + Sync {
    /// Create an inactive account, grant read access, and mail an activation token.
    async fn register(&self, registration: Registration)
    -> Result<UserRecord, AccountsServiceError>;

    /// Consume an activation token: activate the account and grant write access.
    async fn activate(&self, token: &str) -> Result<UserRecord, AccountsServiceError>;

    /// Check credentials and issue an authentication token.
    async fn login(&self, email: &str, password: &str)
    -> Result<IssuedToken, AccountsServiceError>;

    /// Mail a password-reset token to an activated account.
    async fn request_password_reset(&self, email: &str) -> Result<(), AccountsServiceError>;

    /// Consume a password-reset token and store the new password.
    async fn reset_password(&self, token: &str, password: &str)
    -> Result<(), AccountsServiceError>;
}
