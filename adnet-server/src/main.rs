//! AdNet Priorities Server
//!
//! A Rust HTTP daemon that:
//! - Serves resolved ad network priorities per country on `GET /ads/{country}`
//! - Exposes raw stored priorities to the dashboard on `GET /ads`
//! - Accepts bulk updates from the processing pipeline on `PUT /ads`
//!
//! Access via: http://localhost:8080

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod commands;
mod middleware;
mod router;
mod server_utils;
mod state;
#[cfg(test)]
mod test_helpers;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = adnet_core::config::load_config(cli.config.as_deref())?;

    match cli.command {
        None => commands::handle_serve(config, None).await,
        Some(Commands::Serve { port }) => commands::handle_serve(config, port).await,
        Some(Commands::Resolve { country, platform, os_version, json }) => {
            commands::handle_resolve(&config, &country, platform, os_version.as_deref(), json).await
        }
        Some(Commands::List { json }) => commands::handle_list(&config, json).await,
        Some(Commands::Import { file }) => commands::handle_import(&config, &file).await,
        Some(Commands::Delete { country }) => commands::handle_delete(&config, &country).await,
        Some(Commands::Config { json }) => commands::handle_config(&config, json),
    }
}
