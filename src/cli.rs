// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared pieces of the `mcs-*` command-line tools.
//!
//! The tools themselves live in `src/bin/`; the output they print is
//! produced here so it can be tested without spawning processes.

use crate::domain::Result;
use crate::ports::ConfigBackend;
use crate::service::BackendRegistry;
use std::fmt::Write as _;
use tracing_subscriber::EnvFilter;

/// Installs a stderr logger filtered by `RUST_LOG`, showing warnings and
/// errors when it is unset.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Ignore the error when a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Describes the library version and the registered backends.
///
/// # Examples
///
/// ```rust
/// use mcs::cli::render_info;
/// use mcs::service::{BackendRegistry, BackendSelector};
///
/// let registry = BackendRegistry::builder()
///     .with_memory_backend()
///     .with_selector(BackendSelector::new().with_env_override("memory"))
///     .build()
///     .unwrap();
/// let info = render_info(&registry);
/// assert!(info.contains("Selected storage backend: memory\n"));
/// assert!(info.ends_with("   memory\n"));
/// ```
pub fn render_info(registry: &BackendRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "mcs version: {}", crate::version());
    let _ = writeln!(out, "Selected storage backend: {}", registry.selected());
    let _ = writeln!(out, "Available backends for mcs configuration storage:");
    for name in registry.names() {
        let _ = writeln!(out, "   {}", name);
    }
    out
}

/// Draws every section of `backend` followed by its keys as a tree.
///
/// ```text
/// general
///   |-- volume
///   `-- shuffle
/// ```
pub fn render_tree(backend: &dyn ConfigBackend) -> Result<String> {
    let mut out = String::new();
    for section in backend.sections()? {
        let _ = writeln!(out, "{}", section);
        let keys = backend.keys(&section)?;
        let last = keys.len().saturating_sub(1);
        for (index, key) in keys.iter().enumerate() {
            let branch = if index == last { '`' } else { '|' };
            let _ = writeln!(out, "  {}-- {}", branch, key);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryBackend;
    use crate::service::BackendSelector;

    #[test]
    fn test_render_tree() {
        let mut backend = MemoryBackend::new("app");
        backend.set_string("general", "volume", "100").unwrap();
        backend.set_string("general", "shuffle", "TRUE").unwrap();
        backend.set_string("eq", "preamp", "0").unwrap();

        let tree = render_tree(&backend).unwrap();
        assert_eq!(
            tree,
            "general\n  |-- volume\n  `-- shuffle\neq\n  `-- preamp\n"
        );
    }

    #[test]
    fn test_render_tree_empty_section() {
        let mut backend = MemoryBackend::new("app");
        backend.set_string("empty", "key", "value").unwrap();
        backend.unset_key("empty", "key").unwrap();

        assert_eq!(render_tree(&backend).unwrap(), "empty\n");
    }

    #[test]
    fn test_render_info_lists_backends() {
        let registry = BackendRegistry::builder()
            .with_memory_backend()
            .with_selector(BackendSelector::new())
            .build()
            .unwrap();

        let info = render_info(&registry);
        assert!(info.starts_with(&format!("mcs version: {}\n", crate::version())));
        assert!(info.contains("Selected storage backend: default\n"));
        assert!(info.contains("   memory\n"));
    }
}
