//! [`TestDir`] scratch directory for settings scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::xml::{SettingsXml, security_xml};

/// A temporary directory with helpers for writing settings files.
///
/// # Example
///
/// ```rust,no_run
/// use m2_test_utils::{SettingsXml, TestDir};
///
/// let dir = TestDir::new();
/// let user = dir.write_settings(
///     "settings.xml",
///     &SettingsXml::new()
///         .profile("my-profile", &[("my-repo", "https://repo.mycompany.com/maven2")])
///         .active_profile("my-profile"),
/// );
/// assert!(user.is_file());
/// ```
pub struct TestDir {
    temp_dir: TempDir,
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `name` inside the directory, whether or not it exists.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write raw `content` to `name` and return its path.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("TestDir::write: failed to create {}: {e}", parent.display()));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestDir::write: failed to write {}: {e}", path.display()));
        path
    }

    /// Render `settings` and write it to `name`.
    pub fn write_settings(&self, name: &str, settings: &SettingsXml) -> PathBuf {
        self.write(name, &settings.build())
    }

    /// Write a `settings-security.xml` holding the given encrypted master token.
    pub fn write_security(&self, name: &str, master: &str) -> PathBuf {
        self.write(name, &security_xml(Some(master), None))
    }

    /// Write a `settings-security.xml` that only relocates to `target`.
    pub fn write_relocation(&self, name: &str, target: &Path) -> PathBuf {
        let target = target.display().to_string();
        self.write(name, &security_xml(None, Some(&target)))
    }
}
