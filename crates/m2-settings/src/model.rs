//! Effective settings document model
//!
//! These types are what the rest of the workspace sees after decoding,
//! interpolation and merge. They are plain values: nothing downstream of the
//! merge step mutates them.

use serde::Serialize;

/// One settings document, or the merge of a user and a global document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Path of the local artifact cache
    pub local_repository: Option<String>,

    /// Credential entries keyed by `id`
    pub servers: Vec<Server>,

    /// Repository redirections, evaluated in declaration order
    pub mirrors: Vec<Mirror>,

    /// Profiles in declaration order; ids are unique
    pub profiles: Vec<Profile>,

    /// Ids of the profiles whose repositories are bound, in activation order
    pub active_profiles: Vec<String>,

    /// Network proxies in declaration order
    pub proxies: Vec<Proxy>,
}

impl Settings {
    /// Create a document with no entries
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true when the document carries nothing at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Look up a profile by id
    pub fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|profile| profile.id == id)
    }

    /// Look up a server by id
    pub fn server(&self, id: &str) -> Option<&Server> {
        self.servers.iter().find(|server| server.id == id)
    }

    /// The first proxy marked active, if any
    pub fn active_proxy(&self) -> Option<&Proxy> {
        self.proxies.iter().find(|proxy| proxy.active)
    }
}

/// A named group of repository declarations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id: String,
    pub repositories: Vec<Repository>,
}

/// A repository declared inside a profile
///
/// The id is unique within its profile only; two profiles may declare the
/// same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub id: String,
    pub url: String,
}

impl Repository {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// A mirror that stands in for the repositories matched by `mirror_of`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mirror {
    pub id: String,
    pub url: String,

    /// Comma-separated pattern list; `None` never matches
    pub mirror_of: Option<String>,
}

impl Mirror {
    pub fn new(id: impl Into<String>, url: impl Into<String>, mirror_of: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            mirror_of: Some(mirror_of.into()),
        }
    }
}

/// Authentication for the repository (or mirror) with the same id
///
/// The password may be plaintext or an encrypted `{...}` token.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct Server {
    pub id: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

pub const DEFAULT_PROXY_PROTOCOL: &str = "http";
pub const DEFAULT_PROXY_PORT: u16 = 8080;

/// A network proxy declaration
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Proxy {
    pub id: String,
    pub active: bool,
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub non_proxy_hosts: Option<String>,
}

impl Default for Proxy {
    fn default() -> Self {
        Self {
            id: String::new(),
            active: true,
            protocol: DEFAULT_PROXY_PROTOCOL.to_string(),
            host: String::new(),
            port: DEFAULT_PROXY_PORT,
            username: None,
            password: None,
            non_proxy_hosts: None,
        }
    }
}

impl std::fmt::Debug for Proxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proxy")
            .field("id", &self.id)
            .field("active", &self.active)
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("non_proxy_hosts", &self.non_proxy_hosts)
            .finish()
    }
}
