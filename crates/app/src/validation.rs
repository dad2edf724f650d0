//! Field-level input validation.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
    sync::LazyLock,
};

use regex::Regex;
use serde::Serialize;

static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
});

/// Validation failures keyed by field name.
///
/// Only the first failure recorded for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add(field, message);
        }
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// `Ok` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns the collected failures when any field was rejected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut first = true;

        for (field, message) in &self.0 {
            if !first {
                f.write_str(", ")?;
            }

            write!(f, "{field}: {message}")?;

            first = false;
        }

        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_ok_and(|pattern| pattern.is_match(value))
}

/// `true` when every item of `values` is distinct.
#[must_use]
pub fn all_unique(values: &[String]) -> bool {
    let mut seen = rustc_hash::FxHashSet::default();

    values.iter().all(|value| seen.insert(value.as_str()))
}

pub fn validate_email(errors: &mut FieldErrors, email: &str) {
    errors.check(!email.is_empty(), "email", "must be provided");
    errors.check(is_email(email), "email", "must be a valid email address");
}

pub fn validate_password_plaintext(errors: &mut FieldErrors, password: &str) {
    errors.check(!password.is_empty(), "password", "must be provided");
    errors.check(
        password.len() >= 8,
        "password",
        "must be at least 8 bytes long",
    );
    errors.check(
        password.len() <= 72,
        "password",
        "must not be more than 72 bytes long",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_failure_per_field_wins() {
        let mut errors = FieldErrors::new();

        validate_email(&mut errors, "");

        assert_eq!(errors.get("email"), Some("must be provided"));
    }

    #[test]
    fn email_pattern_accepts_and_rejects() {
        assert!(is_email("alice@example.com"));
        assert!(is_email("a.b+tag@sub.example.org"));
        assert!(!is_email("alice@"));
        assert!(!is_email("not an email"));
    }

    #[test]
    fn password_length_bounds() {
        let mut short = FieldErrors::new();
        validate_password_plaintext(&mut short, "1234567");

        let mut long = FieldErrors::new();
        validate_password_plaintext(&mut long, &"x".repeat(73));

        let mut fine = FieldErrors::new();
        validate_password_plaintext(&mut fine, "pa55word");

        assert_eq!(short.get("password"), Some("must be at least 8 bytes long"));
        assert_eq!(long.get("password"), Some("must not be more than 72 bytes long"));
        assert!(fine.into_result().is_ok());
    }

    #[test]
    fn detects_duplicate_values() {
        let tags = vec!["rust".to_string(), "web".to_string(), "rust".to_string()];

        assert!(!all_unique(&tags));
        assert!(all_unique(&tags[..2]));
    }

    #[test]
    fn display_lists_fields_in_order() {
        let mut errors = FieldErrors::new();

        errors.add("name", "must be provided");
        errors.add("email", "must be provided");

        assert_eq!(
            errors.to_string(),
            "email: must be provided, name: must be provided"
        );
    }
}
