//! Error types for m2-crypto

use std::path::PathBuf;

/// Result type for decryption
pub type Result<T> = std::result::Result<T, DecryptError>;

/// Why a password token could not be decrypted
///
/// Callers binding repositories treat every variant the same way: they keep
/// the raw token as the password and carry on.
#[derive(Debug, thiserror::Error)]
pub enum DecryptError {
    /// The token does not contain a usable `{...}` payload
    #[error("Malformed encrypted token: {reason}")]
    MalformedToken { reason: String },

    /// The payload is not valid base64
    #[error("Encrypted payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Wrong key or corrupted ciphertext
    #[error("Cipher rejected the payload (wrong master password or corrupt data)")]
    Cipher,

    /// Decryption succeeded but the plaintext is not UTF-8
    #[error("Decrypted password is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The token names an external cipher through `[type=...]`
    #[error("Unsupported cipher type: {kind}")]
    UnsupportedCipher { kind: String },

    /// The master password could not be obtained from the security settings
    #[error("Master password unavailable: {reason}")]
    MasterUnavailable { reason: String },
}

/// Errors reading `settings-security.xml`
#[derive(Debug, thiserror::Error)]
pub enum SecurityError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse security settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },

    #[error("Security settings relocation target {path} does not exist")]
    RelocationMissing { path: PathBuf },

    #[error("Too many security settings relocations starting at {path}")]
    RelocationDepth { path: PathBuf },

    #[error("No master password is set in {path}")]
    MissingMaster { path: PathBuf },
}
