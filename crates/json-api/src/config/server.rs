//! Server Config

use std::time::Duration;

use clap::Args;

/// Server runtime network settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 4000)]
    pub port: u16,

    /// Deployment environment (development, staging, production)
    #[arg(long = "env", env = "APP_ENV", default_value = "development")]
    pub environment: String,

    /// Seconds to wait for background work (mail sends) after the server stops
    #[arg(long, env = "SHUTDOWN_DRAIN_SECONDS", default_value_t = 20)]
    pub shutdown_drain_seconds: u64,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Upper bound on the post-shutdown background drain.
    #[must_use]
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_drain_seconds)
    }
}
