mod account;
mod admin;
mod console;
mod context;
mod session;
mod shops;

use clap::{Parser, Subcommand};
use servicepro_api::ServiceRequest;
use servicepro_core::{LatLng, ProviderId};
use servicepro_directory::{assistant, Intent, RouteState};
use tracing_subscriber::EnvFilter;

use crate::account::AccountCommands;
use crate::admin::AdminCommands;
use crate::console::{parse_lat_lng, print_route};
use crate::context::{check, Context};
use crate::shops::ShopsCommands;

#[derive(Debug, Parser)]
#[command(name = "servicepro")]
#[command(about = "ServicePro provider directory")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse and manage shops
    Shops {
        #[command(subcommand)]
        command: ShopsCommands,
    },
    /// Driving directions to a shop
    Route {
        /// Shop id
        id: String,
        /// Your position as <lat>,<lng>
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        from: Option<LatLng>,
        /// Read the route summary aloud
        #[arg(long)]
        voice: bool,
    },
    /// Ask a shop to come to you
    Request {
        /// Shop id
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
        /// Your position as <lat>,<lng>; defaults to the map center
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        at: Option<LatLng>,
    },
    /// Account and session management
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },
    /// Admin panel (admin accounts only)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
    /// Ask the help bot a question
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The help bot needs neither config nor network.
    if let Some(Commands::Ask { question }) = &cli.command {
        println!("{}", assistant::reply(&question.join(" ")));
        return Ok(());
    }

    let config = servicepro_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %config.env, api = %config.api_base_url, "configuration loaded");

    let ctx = Context::new(config);

    match cli.command {
        Some(Commands::Shops { command }) => shops::run(&ctx, command).await?,
        Some(Commands::Route { id, from, voice }) => run_route(&ctx, id, from, voice).await?,
        Some(Commands::Request {
            id,
            name,
            phone,
            address,
            at,
        }) => {
            let at = at.unwrap_or(ctx.config.map_center);
            ctx.api()?
                .submit_request(&ServiceRequest {
                    provider_id: id,
                    name,
                    phone,
                    address,
                    lat: at.lat,
                    lng: at.lng,
                })
                .await?;
            println!("Request sent");
        }
        Some(Commands::Account { command }) => account::run(&ctx, command).await?,
        Some(Commands::Admin { command }) => admin::run(&ctx, command).await?,
        Some(Commands::Ask { .. }) => {}
        None => println!("servicepro: run with --help to see commands"),
    }

    Ok(())
}

async fn run_route(
    ctx: &Context,
    id: String,
    from: Option<LatLng>,
    voice: bool,
) -> anyhow::Result<()> {
    let mut dir = ctx.open_directory(from).await?;
    if voice {
        dir.dispatch(Intent::ToggleVoice).await;
    }
    check(&dir.dispatch(Intent::RouteRequested(ProviderId(id))).await)?;
    if let RouteState::Active(route) = dir.route_state() {
        print_route(&route);
    }
    Ok(())
}
