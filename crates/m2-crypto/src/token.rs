//! `{...}` decoration of encrypted values
//!
//! A value counts as encrypted when it contains a brace pair with non-empty
//! content. Text outside the braces is allowed and ignored, so
//! `Deploy key {COQLCE6DU6GtcS5P=}` is encrypted with payload
//! `COQLCE6DU6GtcS5P=`. Values without such a pair are plaintext.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static ENCRYPTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s).*?[^\\]?\{(.*?[^\\])\}.*").unwrap());

/// Returns true when `value` carries an encrypted payload
pub fn is_encrypted(value: &str) -> bool {
    ENCRYPTED.is_match(value)
}

/// Extract the payload between the braces, if any
pub fn undecorate(value: &str) -> Option<&str> {
    ENCRYPTED
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Wrap a payload in braces
pub fn decorate(payload: &str) -> String {
    format!("{{{payload}}}")
}

/// A payload split into its optional `[key=value,...]` prefix and cipher data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload<'a> {
    pub attributes: HashMap<String, String>,
    pub data: &'a str,
}

impl<'a> Payload<'a> {
    /// Split leading attributes off an undecorated payload
    pub fn parse(payload: &'a str) -> Self {
        let trimmed = payload.trim_start();
        let Some(rest) = trimmed.strip_prefix('[') else {
            return Self {
                attributes: HashMap::new(),
                data: payload,
            };
        };
        let Some(close) = rest.find(']') else {
            return Self {
                attributes: HashMap::new(),
                data: payload,
            };
        };

        let attributes = rest[..close]
            .split(',')
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                Some((key.trim().to_string(), value.trim().to_string()))
            })
            .filter(|(key, _)| !key.is_empty())
            .collect();

        Self {
            attributes,
            data: &rest[close + 1..],
        }
    }

    /// The external cipher named by a `type` attribute
    pub fn cipher_type(&self) -> Option<&str> {
        self.attributes.get("type").map(String::as_str)
    }
}
