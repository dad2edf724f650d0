//! Account Data

use crate::{
    domain::users::password::DEFAULT_BCRYPT_COST,
    validation::{FieldErrors, validate_email, validate_password_plaintext},
};

/// Registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub(crate) fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.check(!self.user_name.is_empty(), "name", "must be provided");
        errors.check(
            self.user_name.len() <= 500,
            "name",
            "must not be more than 500 bytes long",
        );

        validate_email(&mut errors, &self.email);
        validate_password_plaintext(&mut errors, &self.password);

        errors.into_result()
    }
}

/// Knobs for the accounts workflow.
#[derive(Debug, Clone)]
pub struct AccountsSettings {
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: u32,

    /// Base URL of the web client, used in mailed links.
    pub frontend_url: String,
}

impl AccountsSettings {
    #[must_use]
    pub fn new(frontend_url: impl Into<String>) -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            frontend_url: frontend_url.into(),
        }
    }
}
