//! Outbound mail.

mod errors;
mod http;
mod log;
mod templates;

use async_trait::async_trait;
use mockall::automock;

pub use errors::MailerError;
pub use http::{HttpMailer, RelayConfig};
pub use log::LogMailer;
pub use templates::{MailTemplate, RenderedMail};

#[automock]
#[async_trait]
/// Delivers rendered templates to a single recipient.
pub trait Mailer: Send + Sync {
    async fn send(&self, recipient: &str, template: &MailTemplate) -> Result<(), MailerError>;
}
