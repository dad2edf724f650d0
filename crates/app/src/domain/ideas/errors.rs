//! Ideas service errors.

use sqlx::Error;
use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum IdeasServiceError {
    #[error("idea not found")]
    NotFound,

    #[error("idea was modified concurrently")]
    EditConflict,

    #[error("failed validation: {0}")]
    FailedValidation(FieldErrors),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for IdeasServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            error => Self::Sql(error),
        }
    }
}

impl From<FieldErrors> for IdeasServiceError {
    fn from(errors: FieldErrors) -> Self {
        Self::FailedValidation(errors)
    }
}
