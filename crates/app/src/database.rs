//! Database connection management

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// `PostgreSQL` connection string.
    pub url: String,

    /// Upper bound on pooled connections.
    pub max_connections: u32,

    /// How long a query waits for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl DatabaseSettings {
    /// Settings for `url` with the default pool limits.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 25,
            acquire_timeout: Duration::from_secs(3),
        }
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(&settings.url)
        .await
}
