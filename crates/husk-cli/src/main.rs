//! Husk CLI binary.
//!
//! Entry point for the `husk` command-line tool. Loads the global
//! configuration, initializes logging via `tracing`, parses arguments with
//! `clap`, and dispatches to the matching command handler.

mod cli;
mod commands;

use husk_core::config::GlobalConfig;
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = cli::parse();
    let config = GlobalConfig::load();

    let level = match &config {
        Ok(config) if config.debug => "debug",
        Ok(config) if config.verbose => "info",
        _ if args.verbose => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    commands::dispatch(args, config?)
}
