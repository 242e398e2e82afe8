//! sitecheck CLI - check whether a website is safe to visit
//!
//! Looks URLs up against Google Safe Browsing from the terminal, either one
//! shot (`sitecheck check`) or in an interactive session with history.

mod cli;
mod commands;
mod error;
mod secret_store;


use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::check::run_check;
use crate::commands::completions::run_completions;
use crate::commands::key::run_key;
use crate::commands::shell::run_shell;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Galat: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sitecheck=warn".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check { urls, json }) => run_check(&urls, json, cli.timeout).await?,
        Some(Commands::Shell) | None => run_shell(cli.timeout).await?,
        Some(Commands::Key { command }) => run_key(command)?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
