// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers shared by the integration tests.

use mcs::service::{BackendRegistry, BackendSelector};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch configuration home with a keyfile registry rooted in it.
#[allow(dead_code)]
pub struct TestHome {
    pub dir: TempDir,
    pub registry: BackendRegistry,
}

#[allow(dead_code)]
impl TestHome {
    /// Creates an empty configuration home that always selects `"default"`.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let registry = keyfile_registry(dir.path());
        Self { dir, registry }
    }

    /// Path of the keyfile backing `domain`.
    pub fn config_file(&self, domain: &str) -> PathBuf {
        self.dir.path().join(domain).join("config")
    }

    /// Writes raw keyfile text for `domain`.
    pub fn seed(&self, domain: &str, contents: &str) -> PathBuf {
        let path = self.config_file(domain);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Reads back the keyfile text for `domain`.
    pub fn read(&self, domain: &str) -> String {
        std::fs::read_to_string(self.config_file(domain)).unwrap()
    }
}

/// Builds a registry holding only the keyfile backend, storing domains below
/// `home` and ignoring the process environment.
#[allow(dead_code)]
pub fn keyfile_registry(home: &Path) -> BackendRegistry {
    BackendRegistry::builder()
        .with_keyfile_backend()
        .with_config_home(home)
        .with_selector(BackendSelector::new())
        .build()
        .unwrap()
}
