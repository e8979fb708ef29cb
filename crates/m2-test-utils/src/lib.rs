//! Shared test utilities for the m2-settings workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not each
//! hand-write settings XML. It is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`dir`]: [`TestDir`](dir::TestDir), a scratch directory for settings files
//! - [`xml`]: [`SettingsXml`](xml::SettingsXml) and [`security_xml`](xml::security_xml) document builders

pub mod dir;
pub mod xml;

pub use dir::TestDir;
pub use xml::{SettingsXml, security_xml};
