// SPDX-License-Identifier: MIT OR Apache-2.0

//! Choosing which backend handles opened domains.
//!
//! The lookup order, highest precedence first:
//!
//! 1. The `MCS_BACKEND` environment variable, taken verbatim.
//! 2. The first line of `~/.mcs-backend`.
//! 3. The first line of `/etc/mcs-backend`, consulted only when the user
//!    file cannot be read.
//!
//! A name read from a file only counts if a backend with that name
//! (compared case-insensitively) is registered; otherwise, and when nothing
//! is configured at all, the `"default"` backend is used.

use crate::adapters::KEYFILE_BACKEND_NAME;
use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the backend to use.
pub const BACKEND_ENV_VAR: &str = "MCS_BACKEND";

/// Per-user selection file, relative to the home directory.
pub const USER_SELECTION_FILE: &str = ".mcs-backend";

/// System-wide selection file, relative to the system configuration directory.
pub const SYSTEM_SELECTION_FILE: &str = "mcs-backend";

/// System configuration directory searched for [`SYSTEM_SELECTION_FILE`].
pub const DEFAULT_SYSCONFDIR: &str = "/etc";

/// What the selection inputs asked for, before matching against the
/// registered backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Named by the environment; used as is, even if nothing is registered
    /// under that name.
    Explicit(String),
    /// Named by a selection file; used only if registered.
    Preferred(String),
    /// Nothing configured.
    Default,
}

impl Selection {
    /// Resolves the request against the registered backend names.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mcs::service::Selection;
    ///
    /// let names = ["default", "memory"];
    /// assert_eq!(Selection::Preferred("MEMORY".into()).resolve(&names), "memory");
    /// assert_eq!(Selection::Preferred("gconf".into()).resolve(&names), "default");
    /// assert_eq!(Selection::Explicit("gconf".into()).resolve(&names), "gconf");
    /// ```
    pub fn resolve<S: AsRef<str>>(&self, registered: &[S]) -> String {
        match self {
            Selection::Explicit(name) => name.clone(),
            Selection::Preferred(name) => registered
                .iter()
                .map(AsRef::as_ref)
                .find(|candidate| candidate.eq_ignore_ascii_case(name))
                .unwrap_or(KEYFILE_BACKEND_NAME)
                .to_string(),
            Selection::Default => KEYFILE_BACKEND_NAME.to_string(),
        }
    }
}

/// The inputs consulted when choosing a backend.
///
/// [`from_env`](BackendSelector::from_env) reads the real environment and
/// files; tests build a selector by hand so no process state is involved.
///
/// # Examples
///
/// ```rust
/// use mcs::service::{BackendSelector, Selection};
///
/// let selector = BackendSelector::new().with_env_override("memory");
/// assert_eq!(selector.read(), Selection::Explicit("memory".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendSelector {
    env_override: Option<String>,
    user_file: Option<PathBuf>,
    system_file: Option<PathBuf>,
}

impl BackendSelector {
    /// Creates a selector that consults nothing and always picks `"default"`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selector from `MCS_BACKEND`, `~/.mcs-backend` and
    /// `/etc/mcs-backend`.
    pub fn from_env() -> Self {
        let env_override = std::env::var(BACKEND_ENV_VAR)
            .ok()
            .filter(|name| !name.is_empty());
        let user_file = BaseDirs::new().map(|dirs| dirs.home_dir().join(USER_SELECTION_FILE));
        let system_file = Path::new(DEFAULT_SYSCONFDIR).join(SYSTEM_SELECTION_FILE);

        Self {
            env_override,
            user_file,
            system_file: Some(system_file),
        }
    }

    /// Sets the name that takes precedence over both files.
    pub fn with_env_override(mut self, name: impl Into<String>) -> Self {
        self.env_override = Some(name.into());
        self
    }

    /// Sets the per-user selection file.
    pub fn with_user_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_file = Some(path.into());
        self
    }

    /// Sets the system-wide selection file.
    pub fn with_system_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.system_file = Some(path.into());
        self
    }

    /// Reads the selection inputs.
    pub fn read(&self) -> Selection {
        if let Some(name) = &self.env_override {
            tracing::debug!("Backend '{}' requested by {}", name, BACKEND_ENV_VAR);
            return Selection::Explicit(name.clone());
        }

        // The system file is only a fallback for an unreadable user file
        let contents = self
            .user_file
            .as_deref()
            .and_then(read_selection_file)
            .or_else(|| self.system_file.as_deref().and_then(read_selection_file));

        match contents.as_deref().and_then(first_line) {
            Some(name) => Selection::Preferred(name.to_string()),
            None => Selection::Default,
        }
    }

    /// Reads the inputs and resolves them against `registered`.
    pub fn select<S: AsRef<str>>(&self, registered: &[S]) -> String {
        let selected = self.read().resolve(registered);
        tracing::debug!("Selected backend '{}'", selected);
        selected
    }
}

fn read_selection_file(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => {
            tracing::debug!("Reading backend selection from '{}'", path.display());
            Some(String::from_utf8_lossy(&bytes).into_owned())
        }
        Err(_) => None,
    }
}

fn first_line(contents: &str) -> Option<&str> {
    let line = contents.lines().next()?.trim();
    (!line.is_empty()).then_some(line)
}
