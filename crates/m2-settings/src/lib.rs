//! Settings documents for repository resolution
//!
//! This crate turns one or two `settings.xml` files into a single effective
//! [`Settings`] value:
//!
//! - **Decoding**: `quick-xml` deserialization of the `<settings>` schema
//!   subset that matters for repository access (servers, mirrors, profiles,
//!   active profiles, proxies, local repository)
//! - **Interpolation**: `${user.home}` and `${env.NAME}` expansion
//! - **Validation**: required ids and urls, unique profile ids
//! - **Merge**: user settings dominate global settings
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use m2_settings::SettingsMerger;
//!
//! let settings = SettingsMerger::new()
//!     .merge(Some(Path::new("/home/dev/.m2/settings.xml")), None)
//!     .unwrap();
//! for id in &settings.active_profiles {
//!     println!("active profile: {id}");
//! }
//! ```

pub mod error;
pub mod interpolate;
pub mod merger;
pub mod model;
pub mod validation;
pub mod xml;

pub use error::{Error, Result};
pub use interpolate::Interpolator;
pub use merger::{SettingsMerger, merge};
pub use model::{Mirror, Profile, Proxy, Repository, Server, Settings};
