//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use m2_resolve::SettingsPaths;

/// m2s - Inspect the repositories your Maven settings resolve to
#[derive(Parser, Debug)]
#[command(name = "m2s")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Locations of the settings documents
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsArgs {
    /// User settings file [default: ~/.m2/settings.xml]
    #[arg(long, global = true, env = "M2S_USER_SETTINGS", value_name = "FILE")]
    pub user_settings: Option<PathBuf>,

    /// Global settings file
    #[arg(long, global = true, env = "M2S_GLOBAL_SETTINGS", value_name = "FILE")]
    pub global_settings: Option<PathBuf>,

    /// Security settings file [default: ~/.m2/settings-security.xml]
    #[arg(long, global = true, env = "M2S_SECURITY_SETTINGS", value_name = "FILE")]
    pub security_settings: Option<PathBuf>,
}

impl SettingsArgs {
    /// Explicit paths, with unset ones taken from the home directory
    pub fn paths(&self) -> SettingsPaths {
        SettingsPaths {
            user: self.user_settings.clone(),
            global: self.global_settings.clone(),
            security: self.security_settings.clone(),
        }
        .with_defaults()
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List the repositories of the active profiles
    ///
    /// Mirrors are applied and credentials resolved; passwords are never shown.
    Repos {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Fail when the settings cannot be loaded instead of listing nothing
        #[arg(long)]
        strict: bool,
    },

    /// Show the merged user and global settings
    EffectiveSettings {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Encrypt a master password for settings-security.xml
    EncryptMaster {
        /// The master password in clear text, read from stdin when omitted
        password: Option<String>,
    },

    /// Encrypt a server password with the configured master password
    EncryptPassword {
        /// The server password in clear text, read from stdin when omitted
        password: Option<String>,
    },
}
