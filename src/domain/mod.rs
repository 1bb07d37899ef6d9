// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and logic.
//!
//! Nothing in this module performs I/O. It defines the keyfile data model,
//! the value conversions shared by every backend, and the error type.

pub mod config_value;
pub mod errors;
pub mod keyfile;
pub mod numeric;

// Re-export commonly used types
pub use config_value::ConfigValue;
pub use errors::{ConfigError, Result};
pub use keyfile::{Entry, Keyfile, Section};
