//! End-to-end resolution: load, merge, bind

use m2_crypto::Decryptor;
use m2_settings::{Settings, SettingsMerger};

use crate::binder::{BoundRepository, RepositoryBinder};
use crate::paths::SettingsPaths;
use crate::sink::RepositorySink;
use crate::Result;

/// Resolves the repositories declared by a set of settings documents
#[derive(Debug, Clone)]
pub struct Resolver {
    paths: SettingsPaths,
    merger: SettingsMerger,
}

impl Resolver {
    pub fn new(paths: SettingsPaths) -> Self {
        Self::with_merger(paths, SettingsMerger::new())
    }

    /// Use a merger with custom interpolation properties
    pub fn with_merger(paths: SettingsPaths, merger: SettingsMerger) -> Self {
        Self { paths, merger }
    }

    pub fn paths(&self) -> &SettingsPaths {
        &self.paths
    }

    /// Merge the user and global documents
    pub fn effective_settings(&self) -> Result<Settings> {
        let settings = self
            .merger
            .merge(self.paths.user.as_deref(), self.paths.global.as_deref())?;
        tracing::debug!(
            profiles = settings.profiles.len(),
            active = settings.active_profiles.len(),
            mirrors = settings.mirrors.len(),
            servers = settings.servers.len(),
            "Effective settings ready"
        );
        Ok(settings)
    }

    /// Decryptor for the configured security document
    pub fn decryptor(&self) -> Decryptor {
        Decryptor::new(self.paths.security.as_deref())
    }

    /// Bind the active repositories into `sink`
    ///
    /// Nothing reaches the sink when loading the settings fails.
    pub fn resolve_into<S: RepositorySink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        let settings = self.effective_settings()?;
        let decryptor = self.decryptor();
        RepositoryBinder::new(&settings, &decryptor).bind_into(sink);
        Ok(())
    }

    /// Bind the active repositories, in order
    pub fn resolve(&self) -> Result<Vec<BoundRepository>> {
        let mut repositories = Vec::new();
        self.resolve_into(&mut repositories)?;
        Ok(repositories)
    }
}

/// Resolve the repositories declared by `paths`
pub fn resolve(paths: &SettingsPaths) -> Result<Vec<BoundRepository>> {
    Resolver::new(paths.clone()).resolve()
}
