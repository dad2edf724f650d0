//! Mailer that only logs, for development without a relay.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::mailer::{Mailer, MailerError, MailTemplate};

#[derive(Debug, Clone)]
pub struct LogMailer {
    sender: String,
}

impl LogMailer {
    #[must_use]
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, recipient: &str, template: &MailTemplate) -> Result<(), MailerError> {
        let mail = template.render();

        info!(
            sender = %self.sender,
            recipient,
            template = template.name(),
            subject = %mail.subject,
            "mail relay not configured; logging message instead"
        );

        debug!(body = %mail.text_body, "undelivered mail body");

        Ok(())
    }
}
