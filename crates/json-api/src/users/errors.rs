//! Account Errors

use tracing::error;

use openconnect_app::domain::accounts::AccountsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: AccountsServiceError) -> ApiError {
    match error {
        AccountsServiceError::FailedValidation(errors) => ApiError::FailedValidation(errors),
        AccountsServiceError::InvalidCredentials => ApiError::InvalidCredentials,
        AccountsServiceError::EditConflict => ApiError::EditConflict,
        AccountsServiceError::Users(_)
        | AccountsServiceError::Tokens(_)
        | AccountsServiceError::Permissions(_)
        | AccountsServiceError::Password(_) => {
            error!(error = ?error, "account operation failed");

            ApiError::ServerError
        }
    }
}
