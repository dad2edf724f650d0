use std::sync::Arc;

use clap::Args;
use openconnect_app::domain::tokens::{
    PgTokensRepository, Tokens, TokensService, records::TokenScope,
};

use crate::cli::UserArgs;

#[derive(Debug, Args)]
pub(crate) struct RevokeTokensArgs {
    #[command(flatten)]
    user: UserArgs,

    /// Token scope to revoke: authentication, activation, or password-reset
    #[arg(long, default_value = "authentication")]
    scope: TokenScope,
}

pub(crate) async fn run(args: RevokeTokensArgs) -> Result<(), String> {
    let (pool, user) = args.user.connect().await?;

    Tokens::new(Arc::new(PgTokensRepository::new(pool)))
        .revoke_all(args.scope, user.uuid)
        .await
        .map_err(|error| format!("failed to revoke tokens: {error}"))?;

    println!("revoked every {} token of {}", args.scope, user.email);

    Ok(())
}
