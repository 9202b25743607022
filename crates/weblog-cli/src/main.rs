//! Weblog CLI - operator interface for the file-backed weblog store.
//!
//! The site's page handlers normally drive the store; this binary gives an
//! operator the same operations from a terminal, plus the admin maintenance
//! commands (data-file optimize pass, system report).

mod cli;
mod commands;
mod config;
mod context;

use clap::Parser;

use cli::Cli;
use context::AppContext;
use weblog_core::VERSION;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut cli = Cli::parse();
    match cli.command.take() {
        Some(command) => {
            let ctx = AppContext::from_cli(&cli)?;
            commands::dispatch(&ctx, command)
        }
        None => {
            println!("Weblog v{}", VERSION);
            println!("\nRun `weblog --help` for usage information.");
            Ok(())
        }
    }
}
