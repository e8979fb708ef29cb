//! Required-field checks for a single decoded document

use std::collections::HashSet;
use std::path::Path;

use crate::model::Settings;
use crate::{Error, Result};

/// Check the required-field rules for one document
///
/// Reports the first violation found. A mirror without `mirrorOf` is valid;
/// it simply never matches anything.
pub fn validate(settings: &Settings, path: &Path) -> Result<()> {
    let invalid = |message: String| Error::Invalid {
        path: path.to_path_buf(),
        message,
    };

    for (index, server) in settings.servers.iter().enumerate() {
        if server.id.is_empty() {
            return Err(invalid(format!("servers.server[{index}].id is missing")));
        }
    }

    for (index, mirror) in settings.mirrors.iter().enumerate() {
        if mirror.id.is_empty() {
            return Err(invalid(format!("mirrors.mirror[{index}].id is missing")));
        }
        if mirror.url.is_empty() {
            return Err(invalid(format!("mirrors.mirror.url for {} is missing", mirror.id)));
        }
    }

    let mut seen_profiles = HashSet::new();
    for (index, profile) in settings.profiles.iter().enumerate() {
        if profile.id.is_empty() {
            return Err(invalid(format!("profiles.profile[{index}].id is missing")));
        }
        if !seen_profiles.insert(profile.id.as_str()) {
            return Err(invalid(format!(
                "profiles.profile.id must be unique but found duplicate profile with id {}",
                profile.id
            )));
        }
        for (repo_index, repo) in profile.repositories.iter().enumerate() {
            if repo.id.is_empty() {
                return Err(invalid(format!(
                    "profiles.profile[{}].repositories.repository[{repo_index}].id is missing",
                    profile.id
                )));
            }
            if repo.url.is_empty() {
                return Err(invalid(format!(
                    "profiles.profile[{}].repositories.repository.url for {} is missing",
                    profile.id, repo.id
                )));
            }
        }
    }

    Ok(())
}
