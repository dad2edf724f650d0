//! Idea Errors

use tracing::error;

use openconnect_app::domain::ideas::IdeasServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: IdeasServiceError) -> ApiError {
    match error {
        IdeasServiceError::NotFound => ApiError::NotFound,
        IdeasServiceError::EditConflict => ApiError::EditConflict,
        IdeasServiceError::FailedValidation(errors) => ApiError::FailedValidation(errors),
        IdeasServiceError::Sql(source) => {
            error!("idea storage failed: {source}");

            ApiError::ServerError
        }
    }
}
