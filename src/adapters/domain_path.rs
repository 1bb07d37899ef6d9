// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolution of configuration domains to on-disk locations.
//!
//! A domain such as `"audacious"` maps to `<config home>/audacious/config`,
//! where the config home is the platform configuration directory
//! (`$XDG_CONFIG_HOME` or `~/.config` on Linux) unless overridden.

use crate::domain::{ConfigError, Result};
use directories::BaseDirs;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// File name of the keyfile inside a domain directory.
pub const CONFIG_FILE_NAME: &str = "config";

/// Maps configuration domains to directories below a base directory.
///
/// # Examples
///
/// ```rust
/// use mcs::adapters::DomainPaths;
/// use std::path::Path;
///
/// let paths = DomainPaths::with_base("/home/user/.config");
/// assert_eq!(
///     paths.config_file("audacious").unwrap(),
///     Path::new("/home/user/.config/audacious/config")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPaths {
    base: PathBuf,
}

impl DomainPaths {
    /// Uses `base` as the configuration home.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Uses the platform configuration directory as the configuration home.
    ///
    /// This method uses the `directories` crate, which honours
    /// `XDG_CONFIG_HOME` and falls back to `$HOME/.config` on Linux.
    pub fn from_platform() -> Result<Self> {
        let dirs = BaseDirs::new().ok_or_else(|| ConfigError::BackendError {
            backend: "default".to_string(),
            message: "Failed to determine the user's configuration directory".to_string(),
            source: None,
        })?;
        Ok(Self::with_base(dirs.config_dir()))
    }

    /// The configuration home.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// The directory holding `domain`'s configuration.
    pub fn domain_dir(&self, domain: &str) -> Result<PathBuf> {
        validate_domain(domain)?;
        Ok(self.base.join(domain))
    }

    /// The keyfile path for `domain`.
    pub fn config_file(&self, domain: &str) -> Result<PathBuf> {
        Ok(self.domain_dir(domain)?.join(CONFIG_FILE_NAME))
    }

    /// Creates `domain`'s directory, and any missing parents, returning the
    /// keyfile path inside it.
    pub fn ensure_domain_dir(&self, domain: &str) -> Result<PathBuf> {
        let dir = self.domain_dir(domain)?;
        create_dir_all(&dir).map_err(|e| ConfigError::io(&dir, e))?;
        Ok(dir.join(CONFIG_FILE_NAME))
    }
}

#[cfg(unix)]
fn create_dir_all(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o755).create(dir)
}

#[cfg(not(unix))]
fn create_dir_all(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

/// Rejects domains that would not stay inside the configuration home.
fn validate_domain(domain: &str) -> Result<()> {
    let reject = |reason: &str| {
        Err(ConfigError::InvalidDomain {
            domain: domain.to_string(),
            reason: reason.to_string(),
        })
    };

    if domain.is_empty() {
        return reject("domain must not be empty");
    }
    for component in Path::new(domain).components() {
        match component {
            Component::Normal(_) => {}
            Component::CurDir => {}
            Component::ParentDir => {
                return reject("parent directory components are not allowed");
            }
            Component::RootDir | Component::Prefix(_) => {
                return reject("domain must be a relative path");
            }
        }
    }
    Ok(())
}
