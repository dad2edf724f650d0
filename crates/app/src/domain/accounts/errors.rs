//! Accounts service errors.

use thiserror::Error;

use crate::{
    domain::{
        permissions::PermissionsRepositoryError,
        tokens::TokensServiceError,
        users::{UsersRepositoryError, password::PasswordError},
    },
    validation::FieldErrors,
};

#[derive(Debug, Error)]
pub enum AccountsServiceError {
    #[error("failed validation: {0}")]
    FailedValidation(FieldErrors),

    #[error("invalid authentication credentials")]
    InvalidCredentials,

    #[error("user was modified concurrently")]
    EditConflict,

    #[error("user storage error")]
    Users(#[source] UsersRepositoryError),

    #[error("token storage error")]
    Tokens(#[from] TokensServiceError),

    #[error("permission storage error")]
    Permissions(#[from] PermissionsRepositoryError),

    #[error("password hashing error")]
    Password(#[from] PasswordError),
}

impl AccountsServiceError {
    pub(crate) fn field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();

        errors.add(field, message);

        Self::FailedValidation(errors)
    }
}

impl From<FieldErrors> for AccountsServiceError {
    fn from(errors: FieldErrors) -> Self {
        Self::FailedValidation(errors)
    }
}

impl From<UsersRepositoryError> for AccountsServiceError {
    fn from(error: UsersRepositoryError) -> Self {
        match error {
            UsersRepositoryError::DuplicateEmail => {
                Self::field("email", "a user with this email address already exists")
            }
            UsersRepositoryError::EditConflict => Self::EditConflict,
            error => Self::Users(error),
        }
    }
}
