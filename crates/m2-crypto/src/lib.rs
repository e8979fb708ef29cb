//! Password protection for settings servers
//!
//! Server passwords in `settings.xml` may be stored as `{...}` tokens. This
//! crate provides:
//!
//! - [`Decryptor`] - turns tokens back into passwords, passing plaintext
//!   through and reporting failures as a [`DecryptError`] value
//! - [`SecuritySettings`] - `settings-security.xml` loading, including
//!   relocation
//! - [`cipher`] - the password-based AES scheme behind the tokens
//! - [`encrypt_master`] / [`Decryptor::encrypt`] - the inverse operations
//!
//! # Example
//!
//! ```
//! use m2_crypto::{Decryptor, encrypt_master};
//!
//! let decryptor = Decryptor::new(None);
//! assert_eq!(decryptor.decrypt("plain").unwrap(), "plain");
//!
//! let token = encrypt_master("secret");
//! assert_eq!(decryptor.decrypt(&token).unwrap(), "secret");
//! ```

pub mod cipher;
pub mod decryptor;
pub mod error;
pub mod security;
pub mod token;

pub use decryptor::{DEFAULT_MASTER_KEY, Decryptor, encrypt_master};
pub use error::{DecryptError, Result, SecurityError};
pub use security::SecuritySettings;
