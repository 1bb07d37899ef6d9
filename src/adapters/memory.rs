// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory configuration backend.
//!
//! Domains live in a map shared by the factory and every backend it opens,
//! so a value flushed through one handle is visible to the next handle opened
//! for the same domain. Nothing touches the filesystem; the data lasts as
//! long as the factory (or any backend opened from it) is alive.

use crate::domain::{ConfigError, Keyfile, Result};
use crate::ports::{BackendFactory, ConfigBackend};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Name the in-memory backend is registered under.
pub const MEMORY_BACKEND_NAME: &str = "memory";

type SharedDomains = Arc<Mutex<HashMap<String, Keyfile>>>;

fn lock(domains: &SharedDomains) -> Result<MutexGuard<'_, HashMap<String, Keyfile>>> {
    domains.lock().map_err(|_| ConfigError::BackendError {
        backend: MEMORY_BACKEND_NAME.to_string(),
        message: "Shared domain store lock poisoned".to_string(),
        source: None,
    })
}

/// A configuration domain held in memory.
///
/// Behaves like the keyfile backend: changes are local until flushed, and
/// dropping a backend with unflushed changes stores them.
#[derive(Debug)]
pub struct MemoryBackend {
    domain: String,
    keyfile: Keyfile,
    dirty: bool,
    store: SharedDomains,
}

impl MemoryBackend {
    /// Creates a standalone backend for `domain` with nothing stored.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            keyfile: Keyfile::new(),
            dirty: false,
            store: SharedDomains::default(),
        }
    }

    /// Returns the domain this backend was opened for.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    fn store_back(&mut self) -> Result<()> {
        lock(&self.store)?.insert(self.domain.clone(), self.keyfile.clone());
        self.dirty = false;
        Ok(())
    }
}

impl ConfigBackend for MemoryBackend {
    fn name(&self) -> &str {
        MEMORY_BACKEND_NAME
    }

    fn get_string(&self, section: &str, key: &str) -> Result<String> {
        self.keyfile
            .get(section, key)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::not_found(section, key))
    }

    fn set_string(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        if self.keyfile.get(section, key) != Some(value) {
            self.keyfile.set(section, key, value);
            self.dirty = true;
        }
        Ok(())
    }

    fn unset_key(&mut self, section: &str, key: &str) -> Result<()> {
        if self.keyfile.remove(section, key).is_some() {
            self.dirty = true;
        }
        Ok(())
    }

    fn sections(&self) -> Result<Vec<String>> {
        Ok(self.keyfile.section_names())
    }

    fn keys(&self, section: &str) -> Result<Vec<String>> {
        self.keyfile
            .keys(section)
            .ok_or_else(|| ConfigError::SectionNotFound {
                section: section.to_string(),
            })
    }

    fn flush(&mut self) -> Result<()> {
        self.store_back()
    }

    fn close(&mut self) -> Result<()> {
        let result = self.store_back();
        self.dirty = false;
        result
    }
}

impl Drop for MemoryBackend {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.store_back() {
                tracing::warn!("Failed to store domain '{}' on drop: {}", self.domain, e);
            }
        }
    }
}

/// Opens [`MemoryBackend`]s that share one map of domains.
///
/// # Examples
///
/// ```rust
/// use mcs::adapters::MemoryBackendFactory;
/// use mcs::ports::{BackendFactory, ConfigBackend};
///
/// let factory = MemoryBackendFactory::new();
/// {
///     let mut backend = factory.open("app").unwrap();
///     backend.set_string("general", "volume", "100").unwrap();
/// }
/// let backend = factory.open("app").unwrap();
/// assert_eq!(backend.get_string("general", "volume").unwrap(), "100");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBackendFactory {
    store: SharedDomains,
}

impl MemoryBackendFactory {
    /// Creates a factory with no domains stored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of what is currently stored for `domain`.
    pub fn snapshot(&self, domain: &str) -> Result<Option<Keyfile>> {
        Ok(lock(&self.store)?.get(domain).cloned())
    }
}

impl BackendFactory for MemoryBackendFactory {
    fn name(&self) -> &str {
        MEMORY_BACKEND_NAME
    }

    fn open(&self, domain: &str) -> Result<Box<dyn ConfigBackend>> {
        let keyfile = lock(&self.store)?.get(domain).cloned().unwrap_or_default();
        tracing::debug!("Opened in-memory domain '{}'", domain);
        Ok(Box::new(MemoryBackend {
            domain: domain.to_string(),
            keyfile,
            dirty: false,
            store: Arc::clone(&self.store),
        }))
    }
}
