//! Users repository errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UsersRepositoryError {
    #[error("user not found")]
    NotFound,

    #[error("a user with this email address already exists")]
    DuplicateEmail,

    #[error("user was modified concurrently")]
    EditConflict,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersRepositoryError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateEmail,
            Some(_) | None => Self::Sql(error),
        }
    }
}
