// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handles to opened configuration domains.

use crate::domain::Result;
use crate::ports::ConfigBackend;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// An opened configuration domain.
///
/// The handle dereferences to the [`ConfigBackend`] serving the domain, so
/// every get/set operation is called directly on it. Dropping the handle
/// writes back pending changes and logs if that fails; use
/// [`close`](ConfigHandle::close) to find out whether the write succeeded.
///
/// # Examples
///
/// ```rust
/// use mcs::service::BackendRegistry;
///
/// # fn main() -> mcs::domain::Result<()> {
/// let registry = BackendRegistry::builder()
///     .with_memory_backend()
///     .with_selector(mcs::service::BackendSelector::new().with_env_override("memory"))
///     .build()?;
///
/// let mut handle = registry.open("audacious")?;
/// handle.set_int("general", "volume", 100)?;
/// assert_eq!(handle.get_int("general", "volume")?, 100);
/// handle.close()?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigHandle {
    domain: String,
    backend: Box<dyn ConfigBackend>,
}

impl ConfigHandle {
    /// Wraps a backend opened for `domain`.
    pub fn new(domain: impl Into<String>, backend: Box<dyn ConfigBackend>) -> Self {
        Self {
            domain: domain.into(),
            backend,
        }
    }

    /// Returns the domain this handle was opened for.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Writes the domain back and releases the handle.
    ///
    /// Unlike dropping, the write happens even if nothing changed, and its
    /// outcome is returned.
    pub fn close(mut self) -> Result<()> {
        tracing::debug!(
            "Closing domain '{}' on backend '{}'",
            self.domain,
            self.backend.name()
        );
        self.backend.close()
    }
}

impl Deref for ConfigHandle {
    type Target = dyn ConfigBackend;

    fn deref(&self) -> &Self::Target {
        self.backend.as_ref()
    }
}

impl DerefMut for ConfigHandle {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.backend.as_mut()
    }
}

impl fmt::Debug for ConfigHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigHandle")
            .field("domain", &self.domain)
            .field("backend", &self.backend.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{KeyfileBackend, MemoryBackend};
    use crate::domain::ConfigError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_handle_derefs_to_backend() {
        let mut handle = ConfigHandle::new("app", Box::new(MemoryBackend::new("app")));
        assert_eq!(handle.domain(), "app");
        assert_eq!(handle.name(), "memory");

        handle.set_string("a", "b", "c").unwrap();
        assert_eq!(handle.get_string("a", "b").unwrap(), "c");
    }

    #[test]
    fn test_close_reports_success() {
        let handle = ConfigHandle::new("app", Box::new(MemoryBackend::new("app")));
        assert!(handle.close().is_ok());
    }

    // Backend whose writes always fail, counting attempts on close and drop
    struct FailingBackend {
        attempts: Arc<AtomicUsize>,
        pending: bool,
    }

    impl FailingBackend {
        fn write(&self) -> Result<()> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(ConfigError::BackendError {
                backend: "failing".to_string(),
                message: "write failed".to_string(),
                source: None,
            })
        }
    }

    impl ConfigBackend for FailingBackend {
        fn name(&self) -> &str {
            "failing"
        }

        fn get_string(&self, section: &str, key: &str) -> Result<String> {
            Err(ConfigError::not_found(section, key))
        }

        fn set_string(&mut self, _section: &str, _key: &str, _value: &str) -> Result<()> {
            self.pending = true;
            Ok(())
        }

        fn unset_key(&mut self, _section: &str, _key: &str) -> Result<()> {
            Ok(())
        }

        fn sections(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }

        fn keys(&self, section: &str) -> Result<Vec<String>> {
            Err(ConfigError::SectionNotFound {
                section: section.to_string(),
            })
        }

        fn flush(&mut self) -> Result<()> {
            self.write()
        }

        fn close(&mut self) -> Result<()> {
            self.pending = false;
            self.write()
        }
    }

    impl Drop for FailingBackend {
        fn drop(&mut self) {
            if self.pending {
                let _ = self.write();
            }
        }
    }

    #[test]
    fn test_failed_close_is_not_retried_on_drop() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let mut handle = ConfigHandle::new(
            "app",
            Box::new(FailingBackend {
                attempts: Arc::clone(&attempts),
                pending: false,
            }),
        );
        handle.set_string("a", "b", "c").unwrap();

        assert!(handle.close().is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_keyfile_close_leaves_nothing_behind() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("gone").join("config");
        let mut handle = ConfigHandle::new("app", Box::new(KeyfileBackend::open(&path).unwrap()));
        handle.set_int("general", "volume", 1).unwrap();

        assert!(matches!(handle.close(), Err(ConfigError::Io { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_debug_names_backend() {
        let handle = ConfigHandle::new("app", Box::new(MemoryBackend::new("app")));
        let debug = format!("{:?}", handle);
        assert!(debug.contains("app"));
        assert!(debug.contains("memory"));
    }
}
