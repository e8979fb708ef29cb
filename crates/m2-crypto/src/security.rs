//! `settings-security.xml` loading
//!
//! ```xml
//! <settingsSecurity>
//!   <master>{jSMOWnoPFgsHVpMvz5VrIt5kRbzGpI8u+9EF1iFQyJQ=}</master>
//! </settingsSecurity>
//! ```
//!
//! A document may instead hold `<relocation>` pointing at another security
//! file (for example on removable media); relocations are followed up to
//! [`MAX_RELOCATIONS`] hops.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SecurityError;

pub const MAX_RELOCATIONS: usize = 8;

/// Parsed `<settingsSecurity>` document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SecuritySettings {
    /// Master password, encrypted with the well-known default key
    #[serde(default)]
    pub master: Option<String>,

    /// Path of the security file that holds the real settings
    #[serde(default)]
    pub relocation: Option<String>,
}

impl SecuritySettings {
    /// Parse one security document without following relocations
    pub fn parse(content: &str, path: &Path) -> Result<Self, SecurityError> {
        let raw: SecuritySettings =
            quick_xml::de::from_str(content).map_err(|source| SecurityError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let clean = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Ok(Self {
            master: clean(raw.master),
            relocation: clean(raw.relocation),
        })
    }

    /// Read `path`, following relocations, and return the encrypted master
    ///
    /// Returns `Ok(None)` only when `path` itself does not exist.
    pub fn load_master(path: &Path) -> Result<Option<String>, SecurityError> {
        if !path.is_file() {
            tracing::debug!(?path, "No security settings found");
            return Ok(None);
        }

        let mut current: PathBuf = path.to_path_buf();
        for _ in 0..=MAX_RELOCATIONS {
            tracing::debug!(path = ?current, "Loading security settings");
            let content =
                fs::read_to_string(&current).map_err(|source| SecurityError::Io {
                    path: current.clone(),
                    source,
                })?;
            let settings = Self::parse(&content, &current)?;

            match settings.relocation {
                Some(target) if settings.master.is_none() => {
                    let target = resolve_relocation(&current, &target);
                    if !target.is_file() {
                        return Err(SecurityError::RelocationMissing { path: target });
                    }
                    current = target;
                }
                _ => {
                    return settings
                        .master
                        .map(Some)
                        .ok_or(SecurityError::MissingMaster { path: current });
                }
            }
        }

        Err(SecurityError::RelocationDepth {
            path: path.to_path_buf(),
        })
    }
}

/// Relative relocation targets are taken relative to the relocating file
fn resolve_relocation(from: &Path, target: &str) -> PathBuf {
    let target = Path::new(target);
    if target.is_absolute() {
        return target.to_path_buf();
    }
    from.parent()
        .map(|dir| dir.join(target))
        .unwrap_or_else(|| target.to_path_buf())
}
