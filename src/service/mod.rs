// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer: the backend registry, backend selection and domain handles.

pub mod handle;
pub mod registry;
pub mod selector;

// Re-export commonly used types
pub use handle::ConfigHandle;
pub use registry::{BackendRegistry, RegistryBuilder, DEFAULT_BACKEND};
pub use selector::{BackendSelector, Selection, BACKEND_ENV_VAR};
