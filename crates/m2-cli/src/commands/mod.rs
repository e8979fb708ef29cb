//! Command implementations for m2-cli

pub mod encrypt;
pub mod repos;
pub mod settings;

pub use encrypt::{run_encrypt_master, run_encrypt_password};
pub use repos::run_repos;
pub use settings::run_effective_settings;
