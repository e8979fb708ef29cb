//! Locations of the settings documents

use std::path::{Path, PathBuf};

/// User settings, relative to the home directory
pub const USER_SETTINGS: &str = ".m2/settings.xml";

/// Security settings, relative to the home directory
pub const SECURITY_SETTINGS: &str = ".m2/settings-security.xml";

/// The three documents a resolution reads
///
/// Every path is optional. A path that is set but does not exist is treated
/// the same as an unset one. There is no default global settings path; hosts
/// pass their installation's `conf/settings.xml` explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPaths {
    pub user: Option<PathBuf>,
    pub global: Option<PathBuf>,
    pub security: Option<PathBuf>,
}

impl SettingsPaths {
    /// No documents at all
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill unset user and security paths from the home directory
    pub fn with_defaults(self) -> Self {
        match dirs::home_dir() {
            Some(home) => self.with_home(&home),
            None => {
                tracing::debug!("No home directory, keeping explicit settings paths only");
                self
            }
        }
    }

    /// Fill unset user and security paths relative to `home`
    pub fn with_home(mut self, home: &Path) -> Self {
        self.user.get_or_insert_with(|| home.join(USER_SETTINGS));
        self.security.get_or_insert_with(|| home.join(SECURITY_SETTINGS));
        self
    }

    pub fn user(mut self, path: impl Into<PathBuf>) -> Self {
        self.user = Some(path.into());
        self
    }

    pub fn global(mut self, path: impl Into<PathBuf>) -> Self {
        self.global = Some(path.into());
        self
    }

    pub fn security(mut self, path: impl Into<PathBuf>) -> Self {
        self.security = Some(path.into());
        self
    }
}
