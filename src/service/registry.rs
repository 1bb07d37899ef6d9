// SPDX-License-Identifier: MIT OR Apache-2.0

//! The backend registry.
//!
//! A [`BackendRegistry`] holds the backend factories available to the
//! process and opens domains on the selected one. It is an ordinary value:
//! build it once at startup, pass it to whatever opens configuration, and
//! [`clear`](BackendRegistry::clear) or drop it at shutdown.

use crate::adapters::{DomainPaths, KeyfileBackendFactory, MemoryBackendFactory};
use crate::domain::{ConfigError, Result};
use crate::ports::BackendFactory;
use crate::service::handle::ConfigHandle;
use crate::service::selector::{BackendSelector, Selection};
use std::fmt;
use std::path::PathBuf;

/// Name of the backend used when nothing else is selected.
pub const DEFAULT_BACKEND: &str = crate::adapters::KEYFILE_BACKEND_NAME;

/// Registered backend factories plus the selection made at build time.
///
/// # Examples
///
/// ```rust,no_run
/// use mcs::service::BackendRegistry;
///
/// # fn main() -> mcs::domain::Result<()> {
/// let registry = BackendRegistry::with_defaults()?;
/// let mut handle = registry.open("audacious")?;
/// handle.set_bool("general", "shuffle", true)?;
/// handle.close()?;
/// # Ok(())
/// # }
/// ```
pub struct BackendRegistry {
    /// Factories in registration order
    factories: Vec<Box<dyn BackendFactory>>,
    /// Selection inputs, read once
    selection: Selection,
}

impl BackendRegistry {
    /// Creates an empty registry using the given selection.
    pub fn new(selection: Selection) -> Self {
        Self {
            factories: Vec::new(),
            selection,
        }
    }

    /// Creates a new registry builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Creates a registry holding the keyfile backend under `"default"`,
    /// storing domains in the platform configuration directory and selecting
    /// the backend from the environment.
    pub fn with_defaults() -> Result<Self> {
        Self::builder().with_keyfile_backend().build()
    }

    /// Registers `factory` under its name.
    ///
    /// A factory already registered under the same name (ignoring case) is
    /// replaced.
    pub fn register(&mut self, factory: Box<dyn BackendFactory>) {
        match self.position(factory.name()) {
            Some(index) => {
                tracing::warn!(
                    "Backend '{}' registered twice, replacing the earlier one",
                    factory.name()
                );
                self.factories[index] = factory;
            }
            None => {
                tracing::debug!("Registered backend '{}'", factory.name());
                self.factories.push(factory);
            }
        }
    }

    /// Removes the backend registered as `name`, returning it.
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn BackendFactory>> {
        let index = self.position(name)?;
        tracing::debug!("Unregistered backend '{}'", name);
        Some(self.factories.remove(index))
    }

    /// Removes every backend.
    pub fn clear(&mut self) {
        self.factories.clear();
    }

    /// Lists registered backend names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.factories.iter().map(|f| f.name().to_string()).collect()
    }

    /// Returns `true` if a backend is registered as `name` (ignoring case).
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the name of the backend [`open`](BackendRegistry::open) uses.
    pub fn selected(&self) -> String {
        self.selection.resolve(&self.names())
    }

    /// Opens `domain` on the selected backend.
    ///
    /// # Errors
    ///
    /// [`ConfigError::BackendNotFound`] if the selected backend is not
    /// registered, or whatever the backend reports while loading the domain.
    pub fn open(&self, domain: &str) -> Result<ConfigHandle> {
        self.open_with(&self.selected(), domain)
    }

    /// Opens `domain` on the backend registered as `backend`.
    pub fn open_with(&self, backend: &str, domain: &str) -> Result<ConfigHandle> {
        let index = self
            .position(backend)
            .ok_or_else(|| ConfigError::BackendNotFound {
                name: backend.to_string(),
            })?;
        let factory = &self.factories[index];
        tracing::debug!("Opening domain '{}' on backend '{}'", domain, factory.name());
        Ok(ConfigHandle::new(domain, factory.open(domain)?))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.factories
            .iter()
            .position(|f| f.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("backends", &self.names())
            .field("selection", &self.selection)
            .finish()
    }
}

enum PendingBackend {
    Keyfile,
    Memory,
    Factory(Box<dyn BackendFactory>),
}

/// Builder for constructing a [`BackendRegistry`].
///
/// # Examples
///
/// ```rust
/// use mcs::service::{BackendSelector, RegistryBuilder};
///
/// # fn main() -> mcs::domain::Result<()> {
/// let dir = tempfile::tempdir()?;
/// let registry = RegistryBuilder::new()
///     .with_keyfile_backend()
///     .with_config_home(dir.path())
///     .with_selector(BackendSelector::new())
///     .build()?;
///
/// assert_eq!(registry.selected(), "default");
/// # Ok(())
/// # }
/// ```
pub struct RegistryBuilder {
    backends: Vec<PendingBackend>,
    config_home: Option<PathBuf>,
    selector: Option<BackendSelector>,
}

impl RegistryBuilder {
    /// Creates a new builder with no backends.
    pub fn new() -> Self {
        Self {
            backends: Vec::new(),
            config_home: None,
            selector: None,
        }
    }

    /// Adds a backend factory.
    pub fn with_backend(mut self, factory: Box<dyn BackendFactory>) -> Self {
        self.backends.push(PendingBackend::Factory(factory));
        self
    }

    /// Adds the keyfile backend as `"default"`.
    pub fn with_keyfile_backend(mut self) -> Self {
        self.backends.push(PendingBackend::Keyfile);
        self
    }

    /// Adds an in-memory backend as `"memory"`.
    pub fn with_memory_backend(mut self) -> Self {
        self.backends.push(PendingBackend::Memory);
        self
    }

    /// Stores keyfile domains below `path` instead of the platform
    /// configuration directory.
    pub fn with_config_home(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_home = Some(path.into());
        self
    }

    /// Uses `selector` instead of [`BackendSelector::from_env`].
    pub fn with_selector(mut self, selector: BackendSelector) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Builds the registry, reading the selection inputs once.
    ///
    /// # Errors
    ///
    /// Fails if the keyfile backend was requested without a configuration
    /// home and the platform configuration directory cannot be determined.
    pub fn build(self) -> Result<BackendRegistry> {
        let selection = self
            .selector
            .unwrap_or_else(BackendSelector::from_env)
            .read();
        let mut registry = BackendRegistry::new(selection);

        for pending in self.backends {
            let factory: Box<dyn BackendFactory> = match pending {
                PendingBackend::Keyfile => {
                    let paths = match &self.config_home {
                        Some(home) => DomainPaths::with_base(home),
                        None => DomainPaths::from_platform()?,
                    };
                    Box::new(KeyfileBackendFactory::new(paths))
                }
                PendingBackend::Memory => Box::new(MemoryBackendFactory::new()),
                PendingBackend::Factory(factory) => factory,
            };
            registry.register(factory);
        }

        tracing::debug!(
            "Built registry with backends {:?}, selected '{}'",
            registry.names(),
            registry.selected()
        );
        Ok(registry)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
