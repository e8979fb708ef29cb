//! Mirror selection
//!
//! A mirror's `mirrorOf` is a comma-separated pattern list, evaluated left to
//! right; the first decisive pattern settles the outcome for that mirror:
//!
//! | pattern | effect for repository `id` |
//! |---|---|
//! | `*` | match |
//! | `external:*` | match (every repository counts as external) |
//! | `id` | match when equal |
//! | `!id` | no match when equal, and no later pattern is consulted |
//!
//! Across mirrors, the first matching mirror in declaration order wins.

use m2_settings::Mirror;

pub const WILDCARD: &str = "*";
pub const EXTERNAL_WILDCARD: &str = "external:*";

/// Returns true when `mirror_of` selects `repository_id`
pub fn matches_pattern(mirror_of: Option<&str>, repository_id: &str) -> bool {
    let Some(mirror_of) = mirror_of else {
        return false;
    };

    for pattern in mirror_of.split(',').map(str::trim) {
        if pattern == WILDCARD || pattern == EXTERNAL_WILDCARD || pattern == repository_id {
            return true;
        }
        if let Some(excluded) = pattern.strip_prefix('!') {
            if excluded.trim() == repository_id {
                return false;
            }
        }
    }
    false
}

/// Finds the mirror, if any, that redirects a repository
#[derive(Debug, Clone, Copy)]
pub struct MirrorResolver<'a> {
    mirrors: &'a [Mirror],
}

impl<'a> MirrorResolver<'a> {
    pub fn new(mirrors: &'a [Mirror]) -> Self {
        Self { mirrors }
    }

    /// The first mirror whose `mirrorOf` matches `repository_id`
    pub fn find(&self, repository_id: &str) -> Option<&'a Mirror> {
        self.mirrors
            .iter()
            .find(|mirror| matches_pattern(mirror.mirror_of.as_deref(), repository_id))
    }
}

/// The first mirror in `mirrors` that redirects `repository_id`
pub fn find_mirror<'a>(mirrors: &'a [Mirror], repository_id: &str) -> Option<&'a Mirror> {
    MirrorResolver::new(mirrors).find(repository_id)
}
