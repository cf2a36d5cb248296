use clap::Subcommand;
use servicepro_directory::admin;

use crate::context::Context;

#[derive(Debug, Subcommand)]
pub(crate) enum AdminCommands {
    /// Show user and shop totals with the account list
    Stats,
    /// Delete an account by username
    DeleteUser { username: String },
}

pub(crate) async fn run(ctx: &Context, command: AdminCommands) -> anyhow::Result<()> {
    let user = ctx.current_user()?;
    let api = ctx.api()?;

    match command {
        AdminCommands::Stats => {
            let total_shops = api.list_shops().await?.len();
            let stats = admin::load(&api, user.as_ref(), total_shops).await?;
            println!("Total users: {}", stats.total_users);
            println!("Total shops: {}", stats.total_shops);
            for record in &stats.users {
                println!(
                    "  {:<6} {:<20} {}",
                    record.user_id(),
                    record.username,
                    record.role.as_str()
                );
            }
        }
        AdminCommands::DeleteUser { username } => {
            let stats = admin::load(&api, user.as_ref(), 0).await?;
            let target = stats
                .users
                .iter()
                .find(|u| u.username == username)
                .ok_or_else(|| anyhow::anyhow!("no user named {username}"))?;
            admin::delete_user(&api, user.as_ref(), target).await?;
            println!("Deleted {username}");
        }
    }
    Ok(())
}
