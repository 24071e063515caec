use clap::{Parser, Subcommand};
use std::path::PathBuf;

use adnet_types::Platform;

#[derive(Parser)]
#[command(
    name = "adnet",
    about = "AdNet Priorities - ad network mediation order service",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, global = true, env = "ADNET_CONFIG", help = "Path to config.json")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP server (default if no command specified)")]
    Serve {
        #[arg(short, long, help = "Override server.port")]
        port: Option<u16>,
    },

    #[command(about = "Resolve priorities for a country as a client would see them")]
    Resolve {
        #[arg(help = "Two-letter upper-case country code")]
        country: String,

        #[arg(long, help = "Client platform (android, ios)")]
        platform: Option<Platform>,

        #[arg(long, help = "Client OS version, e.g. 9.0.1")]
        os_version: Option<String>,

        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "List raw stored priorities for every country")]
    List {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Bulk-replace priorities from a JSON file (country -> record)")]
    Import {
        #[arg(help = "Path to the JSON batch file")]
        file: PathBuf,
    },

    #[command(about = "Remove a country's stored priorities")]
    Delete {
        #[arg(help = "Two-letter upper-case country code")]
        country: String,
    },

    #[command(about = "Show the effective configuration")]
    Config {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },
}
