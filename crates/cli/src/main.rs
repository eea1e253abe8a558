//! Shopdesk console - drive the storefront and admin surfaces from a
//! terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in and browse
//! shopdesk login -e asha@example.com -p hunter2
//! shopdesk products --search mango --page 2
//!
//! # Order some cart lines
//! shopdesk cart checkout --address a1 --select ci1 ci3
//!
//! # Admin work
//! shopdesk admin login -e ops@example.com
//! shopdesk admin orders --status pending
//! shopdesk admin label 64f0c2a9e1 --dir labels
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPDESK_API_URL` - Backend base URL (required)
//! - `SHOPDESK_STATE_PATH` - Where tokens and records persist between runs
//! - `SENTRY_DSN` / `SENTRY_ENVIRONMENT` - Optional error tracking
//! - `RUST_LOG` - Log filter, default `shopdesk=info`
//!
//! See `ApiConfig::from_env` for the remaining client settings.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopdesk_admin::AdminState;
use shopdesk_api::{ApiClient, ApiConfig};
use shopdesk_storefront::StorefrontState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod render;

use commands::admin::AdminCommand;
use commands::store::StoreCommand;
use error::CliError;

#[derive(Parser)]
#[command(name = "shopdesk")]
#[command(author, version, about = "Shopdesk storefront and admin console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands (admin token)
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },
    #[command(flatten)]
    Store(StoreCommand),
}

/// Initialize Sentry error tracking and return the guard that must be kept
/// alive.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok().filter(|d| !d.is_empty())?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: std::env::var("SENTRY_ENVIRONMENT")
                .ok()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));
    Some(guard)
}

/// Warnings and errors become Sentry events; info and debug become
/// breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let _sentry_guard = init_sentry();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopdesk=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ApiConfig::from_env()?;
    let client = ApiClient::from_config(&config)?;
    let mut out = std::io::stdout();

    match cli.command {
        Commands::Admin { action } => {
            let state = AdminState::new(client);
            commands::admin::run(&state, action, &mut out).await
        }
        Commands::Store(command) => {
            let state = StorefrontState::new(client);
            commands::store::run(&state, command, &mut out).await
        }
    }
}
