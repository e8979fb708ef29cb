//! `${...}` expression expansion for settings values
//!
//! Supported expressions:
//!
//! - `${user.home}` - the current user's home directory
//! - `${env.NAME}` - the environment variable `NAME`
//!
//! Expressions that do not resolve are left in place unchanged.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static EXPRESSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// Expands `${...}` expressions from a fixed property table
#[derive(Debug, Clone, Default)]
pub struct Interpolator {
    properties: HashMap<String, String>,
}

impl Interpolator {
    /// Build an interpolator from the process environment and home directory
    pub fn from_environment() -> Self {
        let mut properties: HashMap<String, String> = std::env::vars()
            .map(|(key, value)| (format!("env.{key}"), value))
            .collect();
        if let Some(home) = dirs::home_dir() {
            properties.insert("user.home".to_string(), home.display().to_string());
        }
        Self { properties }
    }

    /// Build an interpolator from explicit properties (keys without `${}`)
    pub fn with_properties(properties: HashMap<String, String>) -> Self {
        Self { properties }
    }

    /// An interpolator that resolves nothing
    pub fn none() -> Self {
        Self::default()
    }

    /// Expand every resolvable expression in `value`
    pub fn interpolate(&self, value: &str) -> String {
        if !value.contains("${") {
            return value.to_string();
        }
        EXPRESSION
            .replace_all(value, |caps: &Captures<'_>| {
                let key = caps[1].trim();
                match self.properties.get(key) {
                    Some(resolved) => resolved.clone(),
                    None => {
                        tracing::debug!(expression = key, "Unresolved settings expression");
                        caps[0].to_string()
                    }
                }
            })
            .into_owned()
    }
}
