//! Token Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::domain::{
    tokens::plaintext::{TokenHash, TokenPlaintext},
    users::records::UserUuid,
};

/// What a token may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenScope {
    Authentication,
    Activation,
    PasswordReset,
}

impl TokenScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Activation => "activation",
            Self::PasswordReset => "password-reset",
        }
    }
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown token scope {0:?}")]
pub struct UnknownTokenScope(String);

impl FromStr for TokenScope {
    type Err = UnknownTokenScope;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "authentication" => Ok(Self::Authentication),
            "activation" => Ok(Self::Activation),
            "password-reset" => Ok(Self::PasswordReset),
            other => Err(UnknownTokenScope(other.to_string())),
        }
    }
}

/// Token Record, as persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRecord {
    pub hash: TokenHash,
    pub user_uuid: UserUuid,
    pub scope: TokenScope,
    pub expiry: Timestamp,
}

/// A freshly issued token together with its plaintext.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub plaintext: TokenPlaintext,
    pub scope: TokenScope,
    pub expiry: Timestamp,
}
