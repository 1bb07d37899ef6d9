// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration backend trait definitions.
//!
//! This module defines the contract every storage backend fulfils. A backend
//! stores string values addressed by a section and a key; the typed accessors
//! are provided on top of the string operations so that every backend reads
//! and writes numbers and booleans the same way.

use crate::domain::{ConfigError, ConfigValue, Result};

/// An opened configuration domain on some storage backend.
///
/// Implementors provide the string operations and the two enumerations. The
/// typed getters and setters are provided methods built on
/// [`get_string`](ConfigBackend::get_string) and
/// [`set_string`](ConfigBackend::set_string).
///
/// # Errors
///
/// Getters return [`ConfigError::NotFound`] when the section or the key is
/// missing. Typed getters never fail on malformed text: it reads as zero or
/// `false` instead.
///
/// # Examples
///
/// ```rust
/// use mcs::ports::ConfigBackend;
/// use mcs::domain::{ConfigError, Keyfile, Result};
///
/// struct MyBackend(Keyfile);
///
/// impl ConfigBackend for MyBackend {
///     fn name(&self) -> &str {
///         "my-backend"
///     }
///
///     fn get_string(&self, section: &str, key: &str) -> Result<String> {
///         self.0
///             .get(section, key)
///             .map(str::to_string)
///             .ok_or_else(|| ConfigError::not_found(section, key))
///     }
///
///     fn set_string(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
///         self.0.set(section, key, value);
///         Ok(())
///     }
///
///     fn unset_key(&mut self, section: &str, key: &str) -> Result<()> {
///         self.0.remove(section, key);
///         Ok(())
///     }
///
///     fn sections(&self) -> Result<Vec<String>> {
///         Ok(self.0.section_names())
///     }
///
///     fn keys(&self, section: &str) -> Result<Vec<String>> {
///         self.0.keys(section).ok_or_else(|| ConfigError::SectionNotFound {
///             section: section.to_string(),
///         })
///     }
///
///     fn flush(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let mut backend = MyBackend(Keyfile::new());
/// backend.set_int("general", "volume", 100).unwrap();
/// assert_eq!(backend.get_int("general", "volume").unwrap(), 100);
/// ```
pub trait ConfigBackend: Send {
    /// Returns the name of this backend, e.g. `"default"` or `"memory"`.
    fn name(&self) -> &str;

    /// Retrieves the value stored under `section`/`key`.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - A copy of the stored value
    /// * `Err(ConfigError::NotFound)` - The section or key does not exist
    fn get_string(&self, section: &str, key: &str) -> Result<String>;

    /// Stores `value` under `section`/`key`, creating the section if needed
    /// and overwriting any existing value.
    fn set_string(&mut self, section: &str, key: &str, value: &str) -> Result<()>;

    /// Removes `section`/`key`. Removing something that does not exist is not
    /// an error.
    fn unset_key(&mut self, section: &str, key: &str) -> Result<()>;

    /// Lists all section names.
    ///
    /// The order is backend specific but stable while the store is not
    /// modified.
    fn sections(&self) -> Result<Vec<String>>;

    /// Lists the keys in `section`.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - The keys, possibly none
    /// * `Err(ConfigError::SectionNotFound)` - The section does not exist
    fn keys(&self, section: &str) -> Result<Vec<String>>;

    /// Writes pending changes to the backing store.
    fn flush(&mut self) -> Result<()>;

    /// Performs the final write before the backend is dropped.
    ///
    /// Backends that write back on drop override this so that a failed
    /// final write is reported once, here, and not attempted again when the
    /// backend is dropped. The default is [`flush`](ConfigBackend::flush).
    fn close(&mut self) -> Result<()> {
        self.flush()
    }

    /// Retrieves `section`/`key` as a [`ConfigValue`].
    fn get_value(&self, section: &str, key: &str) -> Result<ConfigValue> {
        self.get_string(section, key).map(ConfigValue::from)
    }

    /// Retrieves `section`/`key` as an integer.
    ///
    /// Text without a leading number reads as `0`.
    fn get_int(&self, section: &str, key: &str) -> Result<i32> {
        self.get_value(section, key).map(|v| v.as_int())
    }

    /// Retrieves `section`/`key` as a boolean; only `TRUE` (any case) is true.
    fn get_bool(&self, section: &str, key: &str) -> Result<bool> {
        self.get_value(section, key).map(|v| v.as_bool())
    }

    /// Retrieves `section`/`key` as a single precision float.
    fn get_float(&self, section: &str, key: &str) -> Result<f32> {
        self.get_value(section, key).map(|v| v.as_f32())
    }

    /// Retrieves `section`/`key` as a double precision float.
    fn get_double(&self, section: &str, key: &str) -> Result<f64> {
        self.get_value(section, key).map(|v| v.as_f64())
    }

    /// Stores an integer.
    fn set_int(&mut self, section: &str, key: &str, value: i32) -> Result<()> {
        self.set_string(section, key, ConfigValue::from(value).as_str())
    }

    /// Stores a boolean as `TRUE` or `FALSE`.
    fn set_bool(&mut self, section: &str, key: &str, value: bool) -> Result<()> {
        self.set_string(section, key, ConfigValue::from(value).as_str())
    }

    /// Stores a single precision float with six significant digits.
    fn set_float(&mut self, section: &str, key: &str, value: f32) -> Result<()> {
        self.set_string(section, key, ConfigValue::from(value).as_str())
    }

    /// Stores a double precision float so that it reads back exactly.
    fn set_double(&mut self, section: &str, key: &str, value: f64) -> Result<()> {
        self.set_string(section, key, ConfigValue::from(value).as_str())
    }

    /// Stores `value` when it is `Some`, removes the key when it is `None`.
    fn set_optional(&mut self, section: &str, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.set_string(section, key, value),
            None => self.unset_key(section, key),
        }
    }

    /// Returns `true` if `section`/`key` holds a value.
    fn has(&self, section: &str, key: &str) -> bool {
        match self.get_string(section, key) {
            Ok(_) => true,
            Err(ConfigError::NotFound { .. }) => false,
            Err(e) => {
                tracing::debug!(
                    "Error querying backend '{}' for {}/{}: {}",
                    self.name(),
                    section,
                    key,
                    e
                );
                false
            }
        }
    }
}

/// Creates backends for configuration domains.
///
/// A factory is registered once under its name; the registry asks it to open
/// a domain each time a handle is requested.
pub trait BackendFactory: Send + Sync {
    /// The name backends are selected by.
    fn name(&self) -> &str;

    /// Opens `domain`, loading whatever the backing store already holds.
    fn open(&self, domain: &str) -> Result<Box<dyn ConfigBackend>>;
}
