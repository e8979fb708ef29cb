//! User/global settings merge
//!
//! The `SettingsMerger` loads up to two documents and merges them with
//! user precedence:
//!
//! 1. **Global settings** - the recessive layer
//! 2. **User settings** - the dominant layer
//!
//! Scalars take the user value when it is set. Keyed collections (servers,
//! mirrors, proxies, profiles) keep every user entry and append the global
//! entries whose id the user document does not define. Active profile ids
//! are a de-duplicated union, user ids first.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::interpolate::Interpolator;
use crate::model::{Mirror, Profile, Proxy, Server, Settings};
use crate::validation::validate;
use crate::{Error, Result, xml};

/// Loads and merges user and global settings documents
#[derive(Debug, Clone)]
pub struct SettingsMerger {
    interpolator: Interpolator,
}

impl Default for SettingsMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsMerger {
    /// Create a merger that interpolates from the process environment
    pub fn new() -> Self {
        Self {
            interpolator: Interpolator::from_environment(),
        }
    }

    /// Create a merger with a custom interpolator
    ///
    /// This is primarily useful for testing, where expression expansion
    /// must not depend on the real environment.
    pub fn with_interpolator(interpolator: Interpolator) -> Self {
        Self { interpolator }
    }

    /// Load a single settings document
    ///
    /// Returns `Ok(None)` when the path does not point at a file. Malformed
    /// or invalid content is an error carrying the path.
    pub fn load(&self, path: &Path) -> Result<Option<Settings>> {
        if !path.is_file() {
            tracing::debug!(?path, "No settings file found - skipping");
            return Ok(None);
        }

        tracing::debug!(?path, "Loading settings file");
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let settings = xml::decode(&content, path, &self.interpolator)?;
        validate(&settings, path)?;
        Ok(Some(settings))
    }

    /// Load and merge the user and global documents
    ///
    /// Either path may be `None` or point at a missing file; both absent
    /// yields an empty document. A parse failure in either file aborts the
    /// whole merge.
    pub fn merge(&self, user: Option<&Path>, global: Option<&Path>) -> Result<Settings> {
        let global = match global {
            Some(path) => self.load(path)?,
            None => None,
        };
        let user = match user {
            Some(path) => self.load(path)?,
            None => None,
        };

        let settings = match (user, global) {
            (Some(mut user), Some(global)) => {
                user.merge(global);
                user
            }
            (Some(user), None) => user,
            (None, Some(global)) => global,
            (None, None) => Settings::empty(),
        };

        tracing::debug!(
            servers = settings.servers.len(),
            mirrors = settings.mirrors.len(),
            profiles = settings.profiles.len(),
            active_profiles = settings.active_profiles.len(),
            "Effective settings built"
        );
        Ok(settings)
    }
}

/// Load and merge settings with the default environment interpolation
pub fn merge(user: Option<&Path>, global: Option<&Path>) -> Result<Settings> {
    SettingsMerger::new().merge(user, global)
}

/// Entries that are merged by their `id`
trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Server {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Mirror {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Profile {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Proxy {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Append the recessive entries whose id the dominant list lacks
fn shallow_merge_by_id<T: Keyed>(dominant: &mut Vec<T>, recessive: Vec<T>) {
    let known: HashSet<String> = dominant.iter().map(|item| item.key().to_string()).collect();
    dominant.extend(
        recessive
            .into_iter()
            .filter(|item| !known.contains(item.key())),
    );
}

impl Settings {
    /// Merge a recessive document into this (dominant) one
    pub fn merge(&mut self, recessive: Settings) {
        if self
            .local_repository
            .as_deref()
            .is_none_or(|value| value.trim().is_empty())
        {
            self.local_repository = recessive.local_repository;
        }

        for id in recessive.active_profiles {
            if !self.active_profiles.contains(&id) {
                self.active_profiles.push(id);
            }
        }

        shallow_merge_by_id(&mut self.servers, recessive.servers);
        shallow_merge_by_id(&mut self.mirrors, recessive.mirrors);
        shallow_merge_by_id(&mut self.proxies, recessive.proxies);
        shallow_merge_by_id(&mut self.profiles, recessive.profiles);
    }
}
