//! Terminal host for the Travelwise phone sign-in flow.
//!
//! Runs a single-threaded loop over the app routes. Every route passes the
//! session gate before its view is shown.

mod context;
mod notifier;
mod views;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use travelwise_core::domains::auth::GateDecision;
use travelwise_core::routes::Route;
use travelwise_core::Config;

use crate::context::AppContext;
use crate::views::{PendingVerification, ViewResult};

#[derive(Parser)]
#[command(name = "travelwise")]
#[command(about = "Sign in to Travelwise with your phone number")]
struct Cli {
    /// Credential file (overrides TRAVELWISE_CREDENTIALS_PATH)
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Keep users in memory even when Firestore is configured
    #[arg(long)]
    offline: bool,

    /// Path of the first screen (/login, /verify, /register or /)
    #[arg(long, default_value = "/")]
    route: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so they don't interleave with the prompts
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,travelwise_core=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(path) = cli.credentials {
        config.credentials_path = path;
    }

    let ctx = AppContext::new(config, cli.offline)?;
    ctx.print_banner()?;

    if let Some(user) = ctx.restore_session() {
        tracing::debug!("Restored session for {}", user.phone_number);
    }

    run(&ctx, Route::from_path(&cli.route)).await?;

    ctx.print_info("Goodbye!");
    Ok(())
}

/// Route loop. Returns when a view asks to quit.
async fn run(ctx: &AppContext, start: Route) -> Result<()> {
    let mut route = start;
    let mut pending: Option<PendingVerification> = None;

    loop {
        let user = match ctx.gate.enforce(route) {
            GateDecision::Render { user, .. } => user,
            GateDecision::Redirect(to) => {
                tracing::debug!("{} redirected to {}", route, to);
                route = to;
                continue;
            }
        };

        let result = match route {
            Route::Login => views::login(ctx).await?,
            Route::Verify => views::verify(ctx, pending.take()).await?,
            Route::Register => views::register(ctx, user).await?,
            Route::Home => views::home(ctx, user)?,
        };

        match result {
            ViewResult::Navigate(next) => route = next,
            ViewResult::StartVerification(verification) => {
                pending = Some(verification);
                route = Route::Verify;
            }
            ViewResult::Quit => return Ok(()),
        }
    }
}
