// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory model of a keyfile.
//!
//! A [`Keyfile`] owns an ordered list of [`Section`]s and each section owns an
//! ordered list of [`Entry`]s. Section names and keys are matched ignoring
//! ASCII case but keep the spelling they were first created with. Values keep
//! their case and whitespace. Every accessor hands out copies or borrows; no
//! entry outlives the keyfile that owns it.

use serde::{Deserialize, Serialize};

/// Case-insensitive name comparison used for both sections and keys.
fn same_name(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// A single `key=value` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    key: String,
    value: String,
}

impl Entry {
    /// Creates an entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The key as first spelled.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A named group of entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    name: String,
    entries: Vec<Entry>,
}

impl Section {
    /// Creates an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// The section name as first spelled.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns `true` if the section holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the entry for `key`, ignoring case.
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| same_name(&e.key, key))
    }

    /// Looks up the value for `key`, ignoring case.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entry(key).map(Entry::value)
    }

    /// Adds `key` unless it already exists.
    ///
    /// Returns `false`, leaving the existing value alone, when the key is
    /// already present. This is the first-occurrence-wins rule used while
    /// loading a file.
    pub fn insert_new(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.entry(&key).is_some() {
            return false;
        }
        self.entries.push(Entry::new(key, value));
        true
    }

    /// Creates or overwrites the value for `key`.
    ///
    /// An existing entry keeps its position and its original key spelling.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        match self.entries.iter_mut().find(|e| same_name(&e.key, key)) {
            Some(entry) => entry.value = value.into(),
            None => self.entries.push(Entry::new(key, value)),
        }
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|e| same_name(&e.key, key))?;
        Some(self.entries.remove(index).value)
    }

    /// The keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key.clone()).collect()
    }
}

/// The in-memory store: sections of entries.
///
/// # Examples
///
/// ```
/// use mcs::domain::Keyfile;
///
/// let mut keyfile = Keyfile::new();
/// keyfile.set("general", "volume", "100");
///
/// assert_eq!(keyfile.get("General", "VOLUME"), Some("100"));
/// assert_eq!(keyfile.section_names(), vec!["general".to_string()]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyfile {
    sections: Vec<Section>,
}

impl Keyfile {
    /// Creates an empty keyfile.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sections in insertion order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns `true` if the keyfile holds no sections at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Looks up a section, ignoring case.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| same_name(&s.name, name))
    }

    /// Looks up a section for modification, ignoring case.
    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| same_name(&s.name, name))
    }

    /// Returns the index of a newly appended section named `name`.
    ///
    /// Returns `None`, and adds nothing, if a section with that name already
    /// exists.
    pub fn push_section(&mut self, name: impl Into<String>) -> Option<usize> {
        let name = name.into();
        if self.section(&name).is_some() {
            return None;
        }
        self.sections.push(Section::new(name));
        Some(self.sections.len() - 1)
    }

    /// Returns the section at `index`, as handed out by [`Keyfile::push_section`].
    pub fn section_at_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)
    }

    fn section_or_create(&mut self, name: &str) -> &mut Section {
        let index = match self.sections.iter().position(|s| same_name(&s.name, name)) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Looks up the value of `section`/`key`, ignoring case for both.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    /// Sets `section`/`key` to `value`, creating the section when needed.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.section_or_create(section).set(key, value);
    }

    /// Sets `section`/`key` when `value` is `Some`, removes it when `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcs::domain::Keyfile;
    ///
    /// let mut keyfile = Keyfile::new();
    /// keyfile.set_or_remove("player", "skin", Some("classic"));
    /// assert_eq!(keyfile.get("player", "skin"), Some("classic"));
    ///
    /// keyfile.set_or_remove("player", "skin", None);
    /// assert_eq!(keyfile.get("player", "skin"), None);
    /// ```
    pub fn set_or_remove(&mut self, section: &str, key: &str, value: Option<&str>) {
        match value {
            Some(value) => self.set(section, key, value),
            None => {
                self.remove(section, key);
            }
        }
    }

    /// Removes `section`/`key`, returning the old value.
    ///
    /// A missing section or key is not an error. The section itself stays,
    /// even when this removes its last entry.
    pub fn remove(&mut self, section: &str, key: &str) -> Option<String> {
        self.section_mut(section)?.remove(key)
    }

    /// Names of all sections, including empty ones, in insertion order.
    pub fn section_names(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.name.clone()).collect()
    }

    /// Keys of `section` in insertion order, or `None` if it does not exist.
    pub fn keys(&self, section: &str) -> Option<Vec<String>> {
        self.section(section).map(Section::keys)
    }
}
