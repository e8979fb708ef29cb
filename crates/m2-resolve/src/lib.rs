//! Repository resolution from settings documents
//!
//! Combines [`m2_settings`] and [`m2_crypto`] into the list of repositories a
//! build should use:
//!
//! - [`mirror`]: `mirrorOf` pattern matching
//! - [`binder`]: mirror substitution, credential lookup and decryption
//! - [`Resolver`]: load, merge and bind in one call
//!
//! # Example
//!
//! ```no_run
//! use m2_resolve::{Resolver, SettingsPaths};
//!
//! let resolver = Resolver::new(SettingsPaths::new().with_defaults());
//! for repository in resolver.resolve().unwrap() {
//!     println!("{} -> {}", repository.name, repository.url);
//! }
//! ```

pub mod binder;
pub mod error;
pub mod mirror;
pub mod paths;
pub mod resolve;
pub mod sink;

pub use binder::{BoundRepository, Credentials, RepositoryBinder, bind, bind_into};
pub use error::{Error, Result};
pub use mirror::{MirrorResolver, find_mirror, matches_pattern};
pub use paths::SettingsPaths;
pub use resolve::{Resolver, resolve};
pub use sink::RepositorySink;

pub use m2_crypto::Decryptor;
pub use m2_settings::Settings;
