// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tests plugging a hand-written backend into the registry.

use mcs::prelude::*;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A mock backend keeping values in a sorted map.
///
/// Section and key names are stored lowercased. Flushing can be made to
/// fail, and every flush is counted.
#[derive(Debug, Default)]
struct MockBackend {
    values: BTreeMap<String, BTreeMap<String, String>>,
    fail_flush: bool,
    flushes: Arc<AtomicUsize>,
}

impl ConfigBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn get_string(&self, section: &str, key: &str) -> Result<String> {
        self.values
            .get(&section.to_ascii_lowercase())
            .and_then(|keys| keys.get(&key.to_ascii_lowercase()))
            .cloned()
            .ok_or_else(|| ConfigError::not_found(section, key))
    }

    fn set_string(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        self.values
            .entry(section.to_ascii_lowercase())
            .or_default()
            .insert(key.to_ascii_lowercase(), value.to_string());
        Ok(())
    }

    fn unset_key(&mut self, section: &str, key: &str) -> Result<()> {
        if let Some(keys) = self.values.get_mut(&section.to_ascii_lowercase()) {
            keys.remove(&key.to_ascii_lowercase());
        }
        Ok(())
    }

    fn sections(&self) -> Result<Vec<String>> {
        Ok(self.values.keys().cloned().collect())
    }

    fn keys(&self, section: &str) -> Result<Vec<String>> {
        self.values
            .get(&section.to_ascii_lowercase())
            .map(|keys| keys.keys().cloned().collect())
            .ok_or_else(|| ConfigError::SectionNotFound {
                section: section.to_string(),
            })
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        if self.fail_flush {
            Err(ConfigError::BackendError {
                backend: "mock".to_string(),
                message: "Mock flush failure".to_string(),
                source: None,
            })
        } else {
            Ok(())
        }
    }
}

/// Opens [`MockBackend`]s seeded with a few values.
#[derive(Debug, Default)]
struct MockFactory {
    fail_open: bool,
    fail_flush: bool,
    flushes: Arc<AtomicUsize>,
}

impl BackendFactory for MockFactory {
    fn name(&self) -> &str {
        "mock"
    }

    fn open(&self, domain: &str) -> Result<Box<dyn ConfigBackend>> {
        if self.fail_open {
            return Err(ConfigError::BackendError {
                backend: "mock".to_string(),
                message: format!("Cannot open '{}'", domain),
                source: None,
            });
        }

        let mut backend = MockBackend {
            fail_flush: self.fail_flush,
            flushes: Arc::clone(&self.flushes),
            ..MockBackend::default()
        };
        backend.set_string("general", "volume", "75")?;
        backend.set_string("general", "shuffle", "true")?;
        backend.set_string("equalizer", "preamp", "-3.5")?;
        Ok(Box::new(backend))
    }
}

fn registry_with(factory: MockFactory) -> BackendRegistry {
    BackendRegistry::builder()
        .with_memory_backend()
        .with_backend(Box::new(factory))
        .with_selector(BackendSelector::new().with_env_override("mock"))
        .build()
        .unwrap()
}

#[test]
fn test_custom_backend_is_selected() {
    let registry = registry_with(MockFactory::default());
    assert_eq!(registry.names(), vec!["memory", "mock"]);
    assert_eq!(registry.selected(), "mock");

    let handle = registry.open("player").unwrap();
    assert_eq!(handle.name(), "mock");
    assert_eq!(handle.domain(), "player");
}

#[test]
fn test_typed_accessors_over_custom_backend() {
    let registry = registry_with(MockFactory::default());
    let mut handle = registry.open("player").unwrap();

    assert_eq!(handle.get_int("General", "Volume").unwrap(), 75);
    assert!(handle.get_bool("general", "shuffle").unwrap());
    assert_eq!(handle.get_float("equalizer", "preamp").unwrap(), -3.5);

    handle.set_double("equalizer", "preamp", 2.25).unwrap();
    assert_eq!(handle.get_string("equalizer", "preamp").unwrap(), "2.25");

    handle.set_optional("general", "volume", None).unwrap();
    assert!(!handle.has("general", "volume"));
    assert_eq!(handle.keys("general").unwrap(), vec!["shuffle"]);
}

#[test]
fn test_close_reports_flush_failure() {
    let factory = MockFactory {
        fail_flush: true,
        ..MockFactory::default()
    };
    let flushes = Arc::clone(&factory.flushes);
    let registry = registry_with(factory);

    let handle = registry.open("player").unwrap();
    assert!(matches!(
        handle.close(),
        Err(ConfigError::BackendError { .. })
    ));
    assert_eq!(flushes.load(Ordering::SeqCst), 1);
}

#[test]
fn test_open_failure_propagates() {
    let registry = registry_with(MockFactory {
        fail_open: true,
        ..MockFactory::default()
    });

    let err = registry.open("player").unwrap_err();
    assert!(err.to_string().contains("Cannot open 'player'"));
}

#[test]
fn test_open_with_names_backend() {
    let registry = registry_with(MockFactory::default());
    let handle = registry.open_with("MEMORY", "player").unwrap();
    assert_eq!(handle.name(), "memory");
    assert!(handle.sections().unwrap().is_empty());
}

#[test]
fn test_unregistering_selected_backend() {
    let mut registry = registry_with(MockFactory::default());
    assert!(registry.unregister("mock").is_some());

    assert!(matches!(
        registry.open("player"),
        Err(ConfigError::BackendNotFound { .. })
    ));
}
