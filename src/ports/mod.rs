// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! The traits here are the seam between the service layer and the storage
//! backends implemented in the adapters layer.

pub mod backend;

// Re-export commonly used types
pub use backend::{BackendFactory, ConfigBackend};
