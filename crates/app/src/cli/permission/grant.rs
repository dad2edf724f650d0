use clap::Args;
use openconnect_app::domain::permissions::{
    IDEAS_READ, IDEAS_WRITE, PermissionsRepository, PgPermissionsRepository,
};

use crate::cli::UserArgs;

#[derive(Debug, Args)]
pub(crate) struct GrantPermissionArgs {
    #[command(flatten)]
    user: UserArgs,

    /// Permission code to grant, e.g. "ideas:write"
    #[arg(long, value_parser = [IDEAS_READ, IDEAS_WRITE])]
    code: String,
}

pub(crate) async fn run(args: GrantPermissionArgs) -> Result<(), String> {
    let (pool, user) = args.user.connect().await?;

    PgPermissionsRepository::new(pool)
        .add_for_user(user.uuid, &args.code)
        .await
        .map_err(|error| format!("failed to grant permission: {error}"))?;

    println!("granted {} to {}", args.code, user.email);

    Ok(())
}
