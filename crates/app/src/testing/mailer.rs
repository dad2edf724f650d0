use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::mailer::{MailTemplate, Mailer, MailerError};

/// Records every message instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct CapturingMailer {
    sent: Arc<Mutex<Vec<(String, MailTemplate)>>>,
}

impl CapturingMailer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recipient and template of each message, oldest first.
    pub async fn sent(&self) -> Vec<(String, MailTemplate)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, recipient: &str, template: &MailTemplate) -> Result<(), MailerError> {
        self.sent
            .lock()
            .await
            .push((recipient.to_string(), template.clone()));

        Ok(())
    }
}
