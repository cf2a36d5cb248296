use clap::Subcommand;
use servicepro_api::{Credentials, Registration};
use servicepro_core::Role;

use crate::context::Context;

#[derive(Debug, Subcommand)]
pub(crate) enum AccountCommands {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "SERVICEPRO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        username: String,
        #[arg(long, env = "SERVICEPRO_PASSWORD", hide_env_values = true)]
        password: String,
        /// Account type
        #[arg(long, default_value = "user", value_parser = ["user", "provider"])]
        role: String,
        /// Password-recovery question
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
    },
    /// Forget the saved session
    Logout,
    /// Show who is signed in
    Whoami,
}

pub(crate) async fn run(ctx: &Context, command: AccountCommands) -> anyhow::Result<()> {
    match command {
        AccountCommands::Login { username, password } => {
            let user = ctx
                .api()?
                .login(&Credentials { username, password })
                .await?;
            ctx.session.save(&user)?;
            tracing::info!(user = %user.username, role = user.role.as_str(), "logged in");
            println!("Logged in as {} ({})", user.username, user.role.as_str());
        }
        AccountCommands::Register {
            username,
            password,
            role,
            question,
            answer,
        } => {
            let user = ctx
                .api()?
                .register(&Registration {
                    username,
                    password,
                    role: Role::from(role),
                    question,
                    answer,
                })
                .await?;
            ctx.session.save(&user)?;
            println!("Registered and logged in as {}", user.username);
        }
        AccountCommands::Logout => {
            ctx.session.clear()?;
            println!("Logged out");
        }
        AccountCommands::Whoami => match ctx.current_user()? {
            Some(user) => println!("{} ({}), id {}", user.username, user.role.as_str(), user.id),
            None => println!("Not logged in"),
        },
    }
    Ok(())
}
