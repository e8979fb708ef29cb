//! Repository binding
//!
//! Walks the active profiles of an effective [`Settings`] and turns each
//! repository declaration into a [`BoundRepository`]:
//!
//! 1. Profiles are visited in `active_profiles` order; unknown ids are skipped
//! 2. A matching mirror replaces the repository's url and id
//! 3. The server with the resulting id supplies credentials
//! 4. Encrypted passwords are decrypted; on failure the raw value is kept
//!
//! A mirrored repository is registered under the mirror's id, so every
//! repository funnelled through one mirror shares that name.

use std::fmt;

use m2_crypto::Decryptor;
use m2_settings::{Repository, Server, Settings};
use serde::Serialize;

use crate::mirror::MirrorResolver;
use crate::sink::RepositorySink;

/// Username and password for one repository
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: Option<String>,

    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// A repository ready to hand to a build tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundRepository {
    /// Effective id, the mirror's when one matched
    pub name: String,

    /// Effective url, the mirror's when one matched
    pub url: String,

    /// `None` means anonymous access
    pub credentials: Option<Credentials>,

    /// Declared repository id when a mirror replaced it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirrored_from: Option<String>,
}

impl BoundRepository {
    pub fn anonymous(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            credentials: None,
            mirrored_from: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }
}

/// Binds repository declarations against mirrors, servers and a decryptor
#[derive(Debug)]
pub struct RepositoryBinder<'a> {
    settings: &'a Settings,
    decryptor: &'a Decryptor,
    mirrors: MirrorResolver<'a>,
}

impl<'a> RepositoryBinder<'a> {
    pub fn new(settings: &'a Settings, decryptor: &'a Decryptor) -> Self {
        Self {
            settings,
            decryptor,
            mirrors: MirrorResolver::new(&settings.mirrors),
        }
    }

    /// Bind every repository of every active profile into `sink`
    pub fn bind_into<S: RepositorySink + ?Sized>(&self, sink: &mut S) {
        if let Some(proxy) = self.settings.active_proxy() {
            tracing::info!(
                id = %proxy.id,
                protocol = %proxy.protocol,
                host = %proxy.host,
                port = proxy.port,
                "Found active proxy"
            );
            sink.report_proxy(proxy);
        }

        for profile_id in &self.settings.active_profiles {
            let Some(profile) = self.settings.profile(profile_id) else {
                tracing::debug!(profile = %profile_id, "Skipping unknown active profile");
                continue;
            };

            for repository in &profile.repositories {
                sink.register(self.bind_repository(repository));
            }
        }
    }

    /// Bind every repository of every active profile, in order
    pub fn bind(&self) -> Vec<BoundRepository> {
        let mut repositories = Vec::new();
        self.bind_into(&mut repositories);
        repositories
    }

    fn bind_repository(&self, repository: &Repository) -> BoundRepository {
        let (url, id, mirrored_from) = match self.mirrors.find(&repository.id) {
            Some(mirror) => {
                tracing::debug!(
                    repository = %repository.id,
                    mirror = %mirror.id,
                    url = %mirror.url,
                    "Using mirror"
                );
                (mirror.url.as_str(), mirror.id.as_str(), Some(repository.id.clone()))
            }
            None => (repository.url.as_str(), repository.id.as_str(), None),
        };

        let credentials = self.settings.server(id).and_then(|server| self.credentials(server));

        BoundRepository {
            name: id.to_string(),
            url: url.to_string(),
            credentials,
            mirrored_from,
        }
    }

    fn credentials(&self, server: &Server) -> Option<Credentials> {
        if server.username.is_none() && server.password.is_none() {
            return None;
        }

        let password = server.password.as_deref().map(|raw| {
            self.decryptor.decrypt(raw).unwrap_or_else(|e| {
                tracing::warn!(
                    server = %server.id,
                    error = %e,
                    "Failed to decrypt password, using the stored value"
                );
                raw.to_string()
            })
        });

        Some(Credentials {
            username: server.username.clone(),
            password,
        })
    }
}

/// Bind the active repositories of `settings`
pub fn bind(settings: &Settings, decryptor: &Decryptor) -> Vec<BoundRepository> {
    RepositoryBinder::new(settings, decryptor).bind()
}

/// Bind the active repositories of `settings` into `sink`
pub fn bind_into<S: RepositorySink + ?Sized>(
    settings: &Settings,
    decryptor: &Decryptor,
    sink: &mut S,
) {
    RepositoryBinder::new(settings, decryptor).bind_into(sink);
}
