//! Mailer Config

use std::time::Duration;

use clap::Args;
use openconnect_app::mailer::RelayConfig;

/// Outbound mail settings.
#[derive(Debug, Args)]
pub struct MailerConfig {
    /// HTTP mail relay endpoint; mail is only logged when unset
    #[arg(long, env = "MAIL_RELAY_URL")]
    pub mail_relay_url: Option<String>,

    /// Bearer token for the mail relay
    #[arg(long, env = "MAIL_RELAY_TOKEN", hide_env_values = true, default_value = "")]
    pub mail_relay_token: String,

    /// `From` address for outgoing mail
    #[arg(
        long,
        env = "MAIL_SENDER",
        default_value = "OpenConnect <no-reply@openconnect.example>"
    )]
    pub mail_sender: String,

    /// Per-attempt relay timeout in seconds
    #[arg(long, env = "MAIL_RELAY_TIMEOUT_SECONDS", default_value_t = 5)]
    pub mail_relay_timeout_seconds: u64,

    /// Base URL of the web client, used in mailed links
    #[arg(long, env = "FRONTEND_URL", default_value = "http://localhost:3000")]
    pub frontend_url: String,
}

impl MailerConfig {
    /// Relay settings, when a relay is configured.
    pub(crate) fn relay(&self) -> Option<RelayConfig> {
        self.mail_relay_url.as_ref().map(|url| RelayConfig {
            url: url.clone(),
            token: self.mail_relay_token.clone(),
            sender: self.mail_sender.clone(),
            timeout: Duration::from_secs(self.mail_relay_timeout_seconds),
        })
    }
}
