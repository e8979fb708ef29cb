//! Server password decryption
//!
//! The `Decryptor` is built once per resolution from an optional
//! `settings-security.xml` path:
//!
//! - **No file** - encrypted passwords are decrypted with the well-known
//!   default key
//! - **File with a master** - the master is decrypted with the default key,
//!   then used for every password
//! - **Broken file** - construction still succeeds, but every encrypted
//!   password fails with [`DecryptError::MasterUnavailable`]
//!
//! Plaintext values (no `{...}` payload) always pass through unchanged.

use std::fmt;
use std::path::Path;

use crate::security::SecuritySettings;
use crate::token::{Payload, decorate, is_encrypted, undecorate};
use crate::{DecryptError, Result, cipher};

/// Key that protects the master password itself
pub const DEFAULT_MASTER_KEY: &str = "settings.security";

#[derive(Clone)]
enum MasterKey {
    Default,
    Password(String),
    Unavailable(String),
}

/// Decrypts `{...}` password tokens
#[derive(Clone)]
pub struct Decryptor {
    master: MasterKey,
}

impl fmt::Debug for Decryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let master = match &self.master {
            MasterKey::Default => "default",
            MasterKey::Password(_) => "***",
            MasterKey::Unavailable(_) => "unavailable",
        };
        f.debug_struct("Decryptor").field("master", &master).finish()
    }
}

impl Default for Decryptor {
    fn default() -> Self {
        Self {
            master: MasterKey::Default,
        }
    }
}

impl Decryptor {
    /// Create a decryptor from an optional security settings file
    ///
    /// Never fails: problems reading the file are logged and surface later
    /// as [`DecryptError::MasterUnavailable`] from [`decrypt`](Self::decrypt).
    pub fn new(security_settings: Option<&Path>) -> Self {
        let Some(path) = security_settings else {
            return Self::default();
        };

        let master = match SecuritySettings::load_master(path) {
            Ok(None) => MasterKey::Default,
            Ok(Some(token)) => match decrypt_decorated(&token, DEFAULT_MASTER_KEY) {
                Ok(password) => MasterKey::Password(password),
                Err(e) => {
                    tracing::warn!(?path, error = %e, "Failed to decrypt master password");
                    MasterKey::Unavailable(format!("master password in {}: {e}", path.display()))
                }
            },
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to load security settings");
                MasterKey::Unavailable(e.to_string())
            }
        };

        Self { master }
    }

    /// Create a decryptor with an already-decrypted master password
    pub fn with_master_password(password: impl Into<String>) -> Self {
        Self {
            master: MasterKey::Password(password.into()),
        }
    }

    fn master_password(&self) -> Result<&str> {
        match &self.master {
            MasterKey::Default => Ok(DEFAULT_MASTER_KEY),
            MasterKey::Password(password) => Ok(password),
            MasterKey::Unavailable(reason) => Err(DecryptError::MasterUnavailable {
                reason: reason.clone(),
            }),
        }
    }

    /// Decrypt `token`, passing plaintext through unchanged
    pub fn decrypt(&self, token: &str) -> Result<String> {
        if !is_encrypted(token) {
            return Ok(token.to_string());
        }
        decrypt_decorated(token, self.master_password()?)
    }

    /// Encrypt a server password with this decryptor's master password
    pub fn encrypt(&self, clear: &str) -> Result<String> {
        Ok(decorate(&cipher::encrypt(clear, self.master_password()?)))
    }
}

/// Encrypt a master password with the well-known default key
pub fn encrypt_master(clear: &str) -> String {
    decorate(&cipher::encrypt(clear, DEFAULT_MASTER_KEY))
}

fn decrypt_decorated(token: &str, password: &str) -> Result<String> {
    let bare = undecorate(token).ok_or_else(|| DecryptError::MalformedToken {
        reason: "value is not wrapped in {...}".to_string(),
    })?;
    let payload = Payload::parse(bare);
    if let Some(kind) = payload.cipher_type() {
        return Err(DecryptError::UnsupportedCipher {
            kind: kind.to_string(),
        });
    }
    cipher::decrypt(payload.data, password)
}
