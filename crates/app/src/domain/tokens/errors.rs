//! Tokens errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokensServiceError {
    /// No live token matches; wrong and expired tokens are indistinguishable.
    #[error("token not found")]
    NotFound,

    #[error("token expiry out of range")]
    Expiry(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for TokensServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            error => Self::Sql(error),
        }
    }
}
