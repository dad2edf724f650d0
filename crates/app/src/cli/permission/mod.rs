use clap::{Args, Subcommand};

mod grant;
mod list;

#[derive(Debug, Args)]
pub(crate) struct PermissionCommand {
    #[command(subcommand)]
    command: PermissionSubcommand,
}

#[derive(Debug, Subcommand)]
enum PermissionSubcommand {
    Grant(grant::GrantPermissionArgs),
    List(list::ListPermissionsArgs),
}

pub(crate) async fn run(command: PermissionCommand) -> Result<(), String> {
    match command.command {
        PermissionSubcommand::Grant(args) => grant::run(args).await,
        PermissionSubcommand::List(args) => list::run(args).await,
    }
}
