//! Password hashing.
//!
//! bcrypt is CPU bound, so both directions run on the blocking pool.

use thiserror::Error;
use tokio::task::{self, JoinError};

use crate::domain::users::records::PasswordHash;

/// Work factor used outside tests.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt failure")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("password task did not complete")]
    Join(#[from] JoinError),
}

/// Hash `plaintext` with the given bcrypt `cost`.
///
/// # Errors
///
/// Returns an error if bcrypt rejects the input or the blocking task fails.
pub async fn hash_password(plaintext: &str, cost: u32) -> Result<PasswordHash, PasswordError> {
    let plaintext = plaintext.to_string();

    let hash = task::spawn_blocking(move || bcrypt::hash(plaintext, cost)).await??;

    Ok(PasswordHash::new(hash))
}

/// Check `plaintext` against a stored hash.
///
/// # Errors
///
/// Returns an error if the stored hash is malformed or the blocking task fails.
pub async fn verify_password(plaintext: &str, hash: &PasswordHash) -> Result<bool, PasswordError> {
    let plaintext = plaintext.to_string();
    let hash = hash.as_str().to_string();

    Ok(task::spawn_blocking(move || bcrypt::verify(plaintext, &hash)).await??)
}
