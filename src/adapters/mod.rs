// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing storage backend implementations.
//!
//! This module holds the keyfile text format, the file-backed default
//! backend built on it, the resolver mapping domains to files, and an
//! in-memory backend. Each backend implements the `ConfigBackend` trait
//! defined in the ports layer.

pub mod domain_path;
pub mod keyfile_file;
pub mod keyfile_format;
pub mod memory;

pub use domain_path::DomainPaths;
pub use keyfile_file::{KeyfileBackend, KeyfileBackendFactory, KEYFILE_BACKEND_NAME};
pub use keyfile_format::KeyfileFormat;
pub use memory::{MemoryBackend, MemoryBackendFactory, MEMORY_BACKEND_NAME};
