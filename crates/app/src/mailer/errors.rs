//! Mailer errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("mail relay request failed")]
    Http(#[from] reqwest::Error),

    #[error("mail relay rejected the message: {0}")]
    Rejected(String),
}
