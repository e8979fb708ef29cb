//! Effective-settings command implementation

use colored::Colorize;
use m2_resolve::{Resolver, SettingsPaths};
use m2_settings::Settings;

use crate::error::Result;

const MASK: &str = "***";

/// Run the effective-settings command
pub fn run_effective_settings(paths: &SettingsPaths, json: bool) -> Result<()> {
    let settings = masked(Resolver::new(paths.clone()).effective_settings()?);

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    println!("{}", "Effective Settings".bold());
    println!();

    println!(
        "{}:   {}",
        "Local repository".dimmed(),
        settings.local_repository.as_deref().unwrap_or("(default)")
    );
    println!();

    println!("{}:", "Servers".bold());
    if settings.servers.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for server in &settings.servers {
        println!(
            "  {} {} user={} password={}",
            "+".green(),
            server.id.cyan(),
            server.username.as_deref().unwrap_or("-"),
            server.password.as_deref().unwrap_or("-"),
        );
    }
    println!();

    println!("{}:", "Mirrors".bold());
    if settings.mirrors.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for mirror in &settings.mirrors {
        println!(
            "  {} {} {} (mirrorOf {})",
            "+".green(),
            mirror.id.cyan(),
            mirror.url,
            mirror.mirror_of.as_deref().unwrap_or("-"),
        );
    }
    println!();

    println!("{}:", "Profiles".bold());
    if settings.profiles.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for profile in &settings.profiles {
        let state = if settings.active_profiles.contains(&profile.id) {
            "active".green()
        } else {
            "inactive".dimmed()
        };
        println!("  {} {} ({})", "+".green(), profile.id.cyan(), state);
        for repository in &profile.repositories {
            println!("      {} {}", repository.id, repository.url);
        }
    }
    println!();

    println!("{}:", "Proxies".bold());
    if settings.proxies.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for proxy in &settings.proxies {
        let state = if proxy.active {
            "active".green()
        } else {
            "inactive".dimmed()
        };
        println!(
            "  {} {} {}://{}:{} ({})",
            "+".green(),
            proxy.id.cyan(),
            proxy.protocol,
            proxy.host,
            proxy.port,
            state
        );
    }

    Ok(())
}

/// Replace every password with a fixed mask
fn masked(mut settings: Settings) -> Settings {
    for server in &mut settings.servers {
        if server.password.is_some() {
            server.password = Some(MASK.to_string());
        }
    }
    for proxy in &mut settings.proxies {
        if proxy.password.is_some() {
            proxy.password = Some(MASK.to_string());
        }
    }
    settings
}
