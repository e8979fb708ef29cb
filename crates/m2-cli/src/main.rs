//! m2s CLI
//!
//! Resolves the repositories declared by Maven settings files and prints
//! them, along with password encryption helpers.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to initialise logging: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    let paths = cli.settings.paths();
    tracing::debug!(?paths, "Settings locations");

    match cli.command {
        Some(Commands::Repos { json, strict }) => commands::run_repos(&paths, json, strict),
        Some(Commands::EffectiveSettings { json }) => {
            commands::run_effective_settings(&paths, json)
        }
        Some(Commands::EncryptMaster { password }) => commands::run_encrypt_master(password),
        Some(Commands::EncryptPassword { password }) => {
            commands::run_encrypt_password(&paths, password)
        }
        None => {
            println!("{} Maven settings inspector", "m2s".green().bold());
            println!();
            println!("Run {} for available commands.", "m2s --help".cyan());
            Ok(())
        }
    }
}
