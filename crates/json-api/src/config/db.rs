//! Database Config

use std::time::Duration;

use clap::Args;
use openconnect_app::database::DatabaseSettings;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long = "db-max-connections", env = "DB_MAX_CONNECTIONS", default_value_t = 25)]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection
    #[arg(long = "db-acquire-timeout", env = "DB_ACQUIRE_TIMEOUT_SECONDS", default_value_t = 3)]
    pub acquire_timeout_seconds: u64,
}

impl DatabaseConfig {
    pub(crate) fn settings(&self) -> DatabaseSettings {
        DatabaseSettings {
            url: self.database_url.clone(),
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_seconds),
        }
    }
}
