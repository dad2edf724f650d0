use clap::{Args, Parser, Subcommand};
use openconnect_app::{
    database::{self, DatabaseSettings},
    domain::users::{PgUsersRepository, UsersRepository, records::UserRecord},
};
use sqlx::PgPool;

mod permission;
mod token;

#[derive(Debug, Parser)]
#[command(name = "openconnect-app", about = "OpenConnect CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Permission(permission::PermissionCommand),
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Permission(command) => permission::run(command).await,
            Commands::Token(command) => token::run(command).await,
        }
    }
}

/// Arguments shared by every command that acts on one user.
#[derive(Debug, Args)]
pub(crate) struct UserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Email address of the user to act on
    #[arg(long)]
    email: String,
}

impl UserArgs {
    pub(crate) async fn connect(&self) -> Result<(PgPool, UserRecord), String> {
        let pool = database::connect(&DatabaseSettings::from_url(&self.database_url))
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        let user = PgUsersRepository::new(pool.clone())
            .get_by_email(&self.email)
            .await
            .map_err(|error| format!("failed to find user {}: {error}", self.email))?;

        Ok((pool, user))
    }
}
