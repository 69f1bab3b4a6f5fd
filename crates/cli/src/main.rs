//! Wishlist CLI - Drive the wishlist console from the command line.
//!
//! Each invocation fills the form from flags, triggers one action, then
//! prints the notification, the resulting form and any result table.
//!
//! # Usage
//!
//! ```bash
//! # Create a wishlist
//! wishlist-cli wishlist create --customer-id 42 --name Birthday
//!
//! # Search a customer's wishlists (first match is shown in the form)
//! wishlist-cli wishlist search --customer-id 42
//!
//! # Delete every wishlist of a customer
//! wishlist-cli wishlist delete-all --customer-id 42
//!
//! # List items of a wishlist, most expensive first
//! wishlist-cli item search --wishlist-id 7 --sort-by price --order desc
//!
//! # Move item 5 from wishlist 7 to wishlist 9
//! wishlist-cli item move --source 7 --item 5 --target 9
//!
//! # Check the service is up
//! wishlist-cli health
//! ```
//!
//! # Environment Variables
//!
//! - `WISHLIST_API_URL` - Base URL of the service (default: `http://localhost:8080/api`)
//! - `WISHLIST_LOG_FORMAT` - `text` or `json` log output on stderr
//! - `RUST_LOG` - Log filter (default: `wishlist_console=info,wishlist_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wishlist_console::{
    ConfigError, Console, ConsoleConfig, ConsoleError, HttpTransport, LogFormat, TransportError,
};

mod commands;
mod output;

use commands::item::ItemAction;
use commands::wishlist::WishlistAction;

#[derive(Parser)]
#[command(name = "wishlist-cli")]
#[command(author, version, about = "Wishlist admin console")]
struct Cli {
    /// Base URL of the wishlist service, overrides `WISHLIST_API_URL`
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage wishlists
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Manage the items of a wishlist
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },
    /// Check that the service is reachable
    Health,
}

/// Errors that end the process with a non-zero status.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Console(#[from] ConsoleError),

    #[error("Health check failed: {0}")]
    Health(#[from] TransportError),

    /// The action settled with an error notification.
    #[error("Action failed: {0}")]
    Action(String),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.api_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("{e}");
            std::process::exit(2);
        }
    };

    init_tracing(config.log_format);
    tracing::debug!(api_url = %config.api_url, "Configuration loaded");

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn load_config(api_url: Option<&str>) -> Result<ConsoleConfig, CliError> {
    let config = ConsoleConfig::from_env()?;
    Ok(match api_url {
        Some(raw) => config.with_api_url(raw)?,
        None => config,
    })
}

/// Logs go to stderr so stdout only carries the console output.
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wishlist_console=info,wishlist_cli=info".into());

    let is_json = format == LogFormat::Json;
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(command: Commands, config: &ConsoleConfig) -> Result<(), CliError> {
    let console: Console<HttpTransport> = Console::from_config(config)?;

    match command {
        Commands::Wishlist { action } => commands::wishlist::run(&console, action).await,
        Commands::Item { action } => commands::item::run(&console, action).await,
        Commands::Health => commands::health::run(&console).await,
    }
}
