use clap::Args;
use openconnect_app::domain::permissions::{PermissionsRepository, PgPermissionsRepository};

use crate::cli::UserArgs;

#[derive(Debug, Args)]
pub(crate) struct ListPermissionsArgs {
    #[command(flatten)]
    user: UserArgs,
}

pub(crate) async fn run(args: ListPermissionsArgs) -> Result<(), String> {
    let (pool, user) = args.user.connect().await?;

    let permissions = PgPermissionsRepository::new(pool)
        .all_for_user(user.uuid)
        .await
        .map_err(|error| format!("failed to list permissions: {error}"))?;

    if permissions.is_empty() {
        println!("{} holds no permissions", user.email);
        return Ok(());
    }

    for code in permissions.sorted() {
        println!("{code}");
    }

    Ok(())
}
