//! HTTP mail relay client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::warn;

use crate::mailer::{Mailer, MailerError, MailTemplate};

const SEND_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Configuration for an HTTP mail relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Endpoint that accepts a JSON message, e.g. `"https://relay.example/v1/messages"`.
    pub url: String,

    /// Bearer token for the relay.
    pub token: String,

    /// `From` address.
    pub sender: String,

    /// Per-attempt request timeout.
    pub timeout: Duration,
}

/// Sends mail through an HTTP relay, retrying transient failures.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    config: RelayConfig,
    http: Client,
}

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

impl HttpMailer {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: RelayConfig) -> Result<Self, MailerError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    async fn post(&self, message: &RelayMessage<'_>) -> Result<(), MailerError> {
        let response = self
            .http
            .post(&self.config.url)
            .bearer_auth(&self.config.token)
            .json(message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MailerError::Rejected(format!(
                "relay responded with status {status}: {text}"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, recipient: &str, template: &MailTemplate) -> Result<(), MailerError> {
        let mail = template.render();

        let message = RelayMessage {
            from: &self.config.sender,
            to: recipient,
            subject: &mail.subject,
            text: &mail.text_body,
            html: &mail.html_body,
        };

        let mut attempt = 1;

        loop {
            match self.post(&message).await {
                Ok(()) => return Ok(()),
                Err(error) if attempt < SEND_ATTEMPTS => {
                    warn!(
                        attempt,
                        template = template.name(),
                        "mail delivery failed, retrying: {error}"
                    );

                    tokio::time::sleep(RETRY_DELAY).await;

                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
