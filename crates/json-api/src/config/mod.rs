//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig, limiter::LimiterConfig, logging::LoggingConfig, mailer::MailerConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod limiter;
pub(crate) mod logging;
pub(crate) mod mailer;
pub(crate) mod server;

/// OpenConnect JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "openconnect-json", about = "OpenConnect JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network and lifecycle settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Per-client rate limiting.
    #[command(flatten)]
    pub limiter: LimiterConfig,

    /// Outbound mail settings.
    #[command(flatten)]
    pub mailer: MailerConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_follow_the_documented_values() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "openconnect-json",
            "--database-url",
            "postgres://localhost/openconnect",
        ])?;

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.environment, "development");
        assert_eq!(config.database.max_connections, 25);
        assert_eq!(config.limiter.limiter_burst, 4);
        assert!(config.limiter.limiter_enabled, "limiter should default on");
        assert!(config.mailer.relay().is_none(), "no relay without a URL");

        Ok(())
    }

    #[test]
    fn limiter_can_be_disabled() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "openconnect-json",
            "--database-url",
            "postgres://localhost/openconnect",
            "--limiter-enabled",
            "false",
            "--limiter-rps",
            "10",
        ])?;

        let settings = config.limiter.settings();

        assert!(!settings.enabled, "limiter should be off");
        assert!((settings.rps - 10.0).abs() < f64::EPSILON, "rps should be parsed");

        Ok(())
    }
}
