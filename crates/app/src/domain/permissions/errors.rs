//! Permissions errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PermissionsRepositoryError {
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PermissionsRepositoryError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
