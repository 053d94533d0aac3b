//! cookiegate CLI: check configurations and try cookies against them.
//!
//! ```bash
//! cookiegate init
//! cookiegate check --strict
//! cookiegate classify JSESSIONID cookieOne
//! cookiegate rewrite "cookieOne=1; Path=/"
//! ```
//!
//! See `cookiegate --help` for all available commands and options.

mod commands;
mod templates;

use clap::{Parser, Subcommand};
use cookiegate_core::config::{CookieGateConfig, DEFAULT_CONFIG_FILE};
use cookiegate_core::engine::DEFAULT_ENDPOINT;
use cookiegate_core::session::DEFAULT_SESSION_COOKIE_NAME;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cookiegate", about = "SameSite / Secure / Partitioned cookie policy tool", version)]
struct Cli {
    /// Configuration file
    #[arg(long, short, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter cookiegate.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        dir: PathBuf,

        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Session cookie name
        #[arg(long, default_value = DEFAULT_SESSION_COOKIE_NAME)]
        session_cookie: String,
    },
    /// Resolve the configuration and list its diagnostics
    Check {
        /// Fail when any diagnostic is reported
        #[arg(long)]
        strict: bool,
    },
    /// Show the attribute decision for cookie names
    Classify {
        #[arg(required = true)]
        names: Vec<String>,

        #[arg(long, short, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
    },
    /// Rewrite raw Set-Cookie values
    Rewrite {
        #[arg(required = true)]
        values: Vec<String>,

        #[arg(long, short, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
    },
}

fn init_logging(config: &std::path::Path) {
    // A broken file is reported by the command itself
    let logging = CookieGateConfig::load_from(config).map(|c| c.logging).unwrap_or_default();
    if let Err(e) = cookiegate_core::logging::init_logging(&logging.to_logger_config()) {
        eprintln!("Warning: {}", e);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.config);

    let result = match cli.command {
        Commands::Init { dir, endpoint, session_cookie } => commands::init::run(&dir, &endpoint, &session_cookie),
        Commands::Check { strict } => commands::check::run(&cli.config, strict),
        Commands::Classify { names, endpoint } => commands::evaluate::classify(&cli.config, &endpoint, &names),
        Commands::Rewrite { values, endpoint } => commands::evaluate::rewrite(&cli.config, &endpoint, &values),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
