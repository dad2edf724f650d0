//! Token plaintext generation, hashing, and shape checks.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::validation::FieldErrors;

/// Number of random bytes behind every token.
pub const TOKEN_SECRET_BYTES: usize = 32;

/// Length of the unpadded URL-safe base64 encoding of [`TOKEN_SECRET_BYTES`].
pub const TOKEN_PLAINTEXT_LEN: usize = 43;

/// The user-facing token string. Only ever shown once.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPlaintext(String);

impl TokenPlaintext {
    /// Draw a fresh token from the operating system's CSPRNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut secret = [0_u8; TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut secret);

        let encoded = URL_SAFE_NO_PAD.encode(secret);

        secret.zeroize();

        Self(encoded)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn hash(&self) -> TokenHash {
        TokenHash::of(&self.0)
    }
}

impl fmt::Debug for TokenPlaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenPlaintext(**redacted**)")
    }
}

impl Drop for TokenPlaintext {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// SHA-256 digest of a token plaintext; the only form that is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenHash([u8; 32]);

impl TokenHash {
    #[must_use]
    pub fn of(plaintext: &str) -> Self {
        Self(Sha256::digest(plaintext.as_bytes()).into())
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Cheap syntactic check run before any store lookup.
#[must_use]
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_PLAINTEXT_LEN
        && token
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
}

pub fn validate_plaintext(errors: &mut FieldErrors, token: &str) {
    errors.check(!token.is_empty(), "token", "must be provided");
    errors.check(
        token.len() == TOKEN_PLAINTEXT_LEN,
        "token",
        "must be 43 bytes long",
    );
    errors.check(is_well_formed(token), "token", "must be a valid token");
}
