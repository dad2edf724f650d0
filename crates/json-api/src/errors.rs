//! HTTP error responses.

use salvo::{
    http::{
        Method, StatusCode,
        header::{HeaderValue, WWW_AUTHENTICATE},
    },
    oapi::{self, Components, EndpointOutRegister, Operation},
    prelude::{Json, Response, Scribe},
};
use serde_json::json;
use thiserror::Error;

use openconnect_app::validation::FieldErrors;

/// Every failure a request can end in.
///
/// Rendered as `{"error": "<message>"}`, or `{"error": {"field": "message"}}`
/// for validation failures.
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("the requested resource could not be found")]
    NotFound,

    #[error("the {0} method is not supported for this resource")]
    MethodNotAllowed(Method),

    #[error("unable to update the record due to an edit conflict, please try again")]
    EditConflict,

    #[error("failed validation: {0}")]
    FailedValidation(FieldErrors),

    #[error("rate limit exceeded")]
    RateLimitExceeded,

    #[error("invalid authentication credentials")]
    InvalidCredentials,

    #[error("invalid or missing authentication token")]
    InvalidAuthenticationToken,

    #[error("you must be authenticated to access this resource")]
    AuthenticationRequired,

    #[error("your user account must be activated before you can access this resource")]
    InactiveAccount,

    #[error("your user account does not have the necessary permissions to access this resource")]
    NotPermitted,

    /// Any other client error raised by the framework itself.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// The cause has already been logged where it happened.
    #[error("the server encountered a problem and could not process your request")]
    ServerError,
}

impl ApiError {
    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::EditConflict => StatusCode::CONFLICT,
            Self::FailedValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            Self::InvalidCredentials
            | Self::InvalidAuthenticationToken
            | Self::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            Self::InactiveAccount | Self::NotPermitted => StatusCode::FORBIDDEN,
            Self::Rejected { status, .. } => *status,
            Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::FailedValidation(errors)
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        if matches!(self, Self::InvalidAuthenticationToken) {
            res.headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        res.status_code(self.status_code());

        let body = match self {
            Self::FailedValidation(errors) => json!({ "error": errors }),
            other => json!({ "error": other.to_string() }),
        };

        res.render(Json(body));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(_components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::UNAUTHORIZED, "Unauthorized"),
            (StatusCode::FORBIDDEN, "Forbidden"),
            (StatusCode::NOT_FOUND, "Not Found"),
            (StatusCode::CONFLICT, "Edit Conflict"),
            (StatusCode::UNPROCESSABLE_ENTITY, "Failed Validation"),
            (StatusCode::TOO_MANY_REQUESTS, "Rate Limit Exceeded"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation
                .responses
                .insert(status.as_str(), oapi::Response::new(description));
        }
    }
}
