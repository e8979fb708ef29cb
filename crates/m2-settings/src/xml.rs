//! Decoding of `settings.xml` documents
//!
//! The XML shape is mirrored by private `*Xml` structs that `quick-xml`
//! deserializes into; they are then normalized (trimmed, interpolated,
//! defaulted) into the public model. Elements this crate does not model,
//! such as `<pluginGroups>` or `<activation>`, are skipped.
//!
//! Before deserializing, a pass over the raw events checks what serde cannot
//! see: the root element must be `<settings>`, no text may sit directly
//! inside it, and only comments or processing instructions may follow it.

use std::path::Path;

use quick_xml::DeError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde::Deserialize;

use crate::interpolate::Interpolator;
use crate::model::{Mirror, Profile, Proxy, Repository, Server, Settings};
use crate::{Error, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsXml {
    #[serde(default)]
    local_repository: Option<String>,
    #[serde(default)]
    servers: ServersXml,
    #[serde(default)]
    mirrors: MirrorsXml,
    #[serde(default)]
    profiles: ProfilesXml,
    #[serde(default)]
    active_profiles: ActiveProfilesXml,
    #[serde(default)]
    proxies: ProxiesXml,
}

#[derive(Debug, Default, Deserialize)]
struct ServersXml {
    #[serde(default)]
    server: Vec<ServerXml>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerXml {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MirrorsXml {
    #[serde(default)]
    mirror: Vec<MirrorXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MirrorXml {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    mirror_of: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProfilesXml {
    #[serde(default)]
    profile: Vec<ProfileXml>,
}

#[derive(Debug, Default, Deserialize)]
struct ProfileXml {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    repositories: RepositoriesXml,
}

#[derive(Debug, Default, Deserialize)]
struct RepositoriesXml {
    #[serde(default)]
    repository: Vec<RepositoryXml>,
}

#[derive(Debug, Default, Deserialize)]
struct RepositoryXml {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActiveProfilesXml {
    #[serde(default)]
    active_profile: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProxiesXml {
    #[serde(default)]
    proxy: Vec<ProxyXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProxyXml {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    active: Option<bool>,
    #[serde(default)]
    protocol: Option<String>,
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    non_proxy_hosts: Option<String>,
}

/// Decode a settings document from XML text
///
/// `path` is only used to label errors. String values are trimmed, empty
/// values are treated as absent, and `${...}` expressions are expanded with
/// `interpolator`.
pub fn decode(content: &str, path: &Path, interpolator: &Interpolator) -> Result<Settings> {
    check_structure(content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: SettingsXml = quick_xml::de::from_str(content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let text = |value: Option<String>| -> Option<String> {
        value
            .map(|v| interpolator.interpolate(v.trim()))
            .filter(|v| !v.is_empty())
    };
    let required = |value: Option<String>| text(value).unwrap_or_default();

    let settings = Settings {
        local_repository: text(raw.local_repository),
        servers: raw
            .servers
            .server
            .into_iter()
            .map(|server| Server {
                id: required(server.id),
                username: text(server.username),
                password: text(server.password),
            })
            .collect(),
        mirrors: raw
            .mirrors
            .mirror
            .into_iter()
            .map(|mirror| Mirror {
                id: required(mirror.id),
                url: required(mirror.url),
                mirror_of: text(mirror.mirror_of),
            })
            .collect(),
        profiles: raw
            .profiles
            .profile
            .into_iter()
            .map(|profile| Profile {
                id: required(profile.id),
                repositories: profile
                    .repositories
                    .repository
                    .into_iter()
                    .map(|repo| Repository {
                        id: required(repo.id),
                        url: required(repo.url),
                    })
                    .collect(),
            })
            .collect(),
        active_profiles: raw
            .active_profiles
            .active_profile
            .into_iter()
            .filter_map(|id| text(Some(id)))
            .collect(),
        proxies: raw
            .proxies
            .proxy
            .into_iter()
            .map(|proxy| {
                let defaults = Proxy::default();
                Proxy {
                    id: text(proxy.id).unwrap_or(defaults.id),
                    active: proxy.active.unwrap_or(defaults.active),
                    protocol: text(proxy.protocol).unwrap_or(defaults.protocol),
                    host: required(proxy.host),
                    port: proxy.port.unwrap_or(defaults.port),
                    username: text(proxy.username),
                    password: text(proxy.password),
                    non_proxy_hosts: text(proxy.non_proxy_hosts),
                }
            })
            .collect(),
    };

    Ok(settings)
}

const ROOT: &str = "settings";

/// Reject documents whose outline is wrong but which serde would accept
///
/// Unclosed elements are left to the deserializer, which reports them.
fn check_structure(content: &str) -> std::result::Result<(), DeError> {
    let mut reader = Reader::from_str(content);
    let mut depth = 0usize;
    let mut root_closed = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if depth == 0 => {
                check_root(&e, root_closed)?;
                depth = 1;
            }
            Event::Empty(e) if depth == 0 => {
                check_root(&e, root_closed)?;
                root_closed = true;
            }
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                root_closed = depth == 0;
            }
            Event::Text(text) if depth <= 1 => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    let place = if depth == 0 {
                        "outside the root element"
                    } else {
                        "directly inside <settings>"
                    };
                    return Err(DeError::Custom(format!("unexpected text {place}")));
                }
            }
            Event::CData(_) if depth <= 1 => {
                return Err(DeError::Custom("unexpected CDATA section".to_string()));
            }
            Event::Eof => return Ok(()),
            _ => {}
        }
    }
}

fn check_root(element: &BytesStart<'_>, root_closed: bool) -> std::result::Result<(), DeError> {
    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
    if root_closed {
        return Err(DeError::Custom(format!(
            "unexpected <{name}> after the root element"
        )));
    }
    if element.local_name().as_ref() != ROOT.as_bytes() {
        return Err(DeError::Custom(format!(
            "root element is <{name}>, expected <{ROOT}>"
        )));
    }
    Ok(())
}
