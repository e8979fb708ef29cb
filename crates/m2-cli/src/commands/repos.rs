//! Repos command implementation

use colored::Colorize;
use m2_resolve::{BoundRepository, Resolver, SettingsPaths};

use crate::error::Result;

/// Run the repos command
///
/// Without `strict`, a settings failure is logged and reported as an empty
/// list so that a broken settings file never stops the caller.
pub fn run_repos(paths: &SettingsPaths, json: bool, strict: bool) -> Result<()> {
    let repositories = load(paths, strict)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&repositories)?);
        return Ok(());
    }

    println!("{}", "Repositories".bold());
    println!();
    if repositories.is_empty() {
        println!("  {} (no active profile declares a repository)", "None".dimmed());
        return Ok(());
    }
    for repository in &repositories {
        println!("  {} {}", "+".green(), describe(repository));
    }

    Ok(())
}

fn load(paths: &SettingsPaths, strict: bool) -> Result<Vec<BoundRepository>> {
    match Resolver::new(paths.clone()).resolve() {
        Ok(repositories) => Ok(repositories),
        Err(e) if !strict => {
            tracing::error!(error = %e, "Failed to resolve repositories");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

fn describe(repository: &BoundRepository) -> String {
    let mut line = format!("{} {}", repository.name.cyan(), repository.url);

    match repository
        .credentials
        .as_ref()
        .and_then(|c| c.username.as_deref())
    {
        Some(username) => line.push_str(&format!(" (authenticated as {username})")),
        None if repository.is_authenticated() => line.push_str(" (authenticated)"),
        None => line.push_str(&format!(" ({})", "anonymous".dimmed())),
    }

    if let Some(original) = &repository.mirrored_from {
        line.push_str(&format!(" [mirror for {original}]"));
    }

    line
}
