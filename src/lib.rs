// SPDX-License-Identifier: MIT OR Apache-2.0

//! mcs, a modular configuration system.
//!
//! Applications store their settings in a configuration *domain*, addressed
//! by section and key, without caring where the values end up. The storage
//! backend is chosen once per process; the default backend keeps each domain
//! in a keyfile:
//!
//! ```text
//! [general]
//! volume=100
//! shuffle=TRUE
//!
//! [equalizer]
//! preamp=0
//! ```
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: The in-memory keyfile model, values and errors
//!   (`Keyfile`, `ConfigValue`, `ConfigError`)
//! - **Ports**: The backend contract (`ConfigBackend`, `BackendFactory`)
//! - **Adapters**: The keyfile format, the file-backed and in-memory
//!   backends, and the domain path resolver
//! - **Service**: Backend selection, the registry and domain handles
//!
//! # Feature Flags
//!
//! - `cli`: The `mcs-*` command-line tools and their logging setup (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mcs::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let registry = BackendRegistry::with_defaults()?;
//! let mut handle = registry.open("audacious")?;
//!
//! handle.set_int("general", "volume", 100)?;
//! let shuffle = handle.get_bool("general", "shuffle").unwrap_or(false);
//! println!("shuffle: {}", shuffle);
//!
//! handle.close()?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
#[cfg(feature = "cli")]
pub mod cli;
pub mod domain;
pub mod ports;
pub mod service;

/// Returns the library name and version, e.g. `mcs-0.1.0`.
pub fn version() -> String {
    format!("{}-{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{
        DomainPaths, KeyfileBackend, KeyfileBackendFactory, KeyfileFormat, MemoryBackendFactory,
    };
    pub use crate::domain::{ConfigError, ConfigValue, Keyfile, Result};
    pub use crate::ports::{BackendFactory, ConfigBackend};
    pub use crate::service::{BackendRegistry, BackendSelector, ConfigHandle, RegistryBuilder};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert_eq!(super::version(), format!("mcs-{}", env!("CARGO_PKG_VERSION")));
    }
}
