//! Preferences: the single persisted key-value slot
//!
//! - Memory: process-local map, with a `deny` switch for privacy-mode tests
//! - Local: `localStorage` through gloo (wasm feature)

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{StorageError, StorageResult};

#[cfg(feature = "wasm")]
use crate::wasm::LocalPreferences;

/// In-memory preference store
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: Rc<RefCell<HashMap<String, String>>>,
    denied: Rc<Cell<bool>>,
}

impl MemoryPreferences {
    pub fn new() -> Self { Self::default() }

    /// Make every subsequent access fail, like storage blocked by the browser
    pub fn deny(&self) { self.denied.set(true); }

    pub fn allow(&self) { self.denied.set(false); }

    pub fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.denied.get() {
            return Err(StorageError::Denied(format!("read {}", key)));
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    pub fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.denied.get() {
            return Err(StorageError::Denied(format!("write {}", key)));
        }
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preference store dispatching to a backend
#[derive(Debug, Clone)]
pub enum Preferences {
    Memory(MemoryPreferences),
    #[cfg(feature = "wasm")]
    Local(LocalPreferences),
}

impl From<MemoryPreferences> for Preferences {
    fn from(prefs: MemoryPreferences) -> Self { Preferences::Memory(prefs) }
}

impl Preferences {
    pub fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self {
            Preferences::Memory(p) => p.get(key),
            #[cfg(feature = "wasm")]
            Preferences::Local(p) => p.get(key),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        match self {
            Preferences::Memory(p) => p.set(key, value),
            #[cfg(feature = "wasm")]
            Preferences::Local(p) => p.set(key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_roundtrip_and_denial() {
        let memory = MemoryPreferences::new();
        let prefs = Preferences::from(memory.clone());

        assert_eq!(prefs.get("theme").unwrap(), None);
        prefs.set("theme", "light").unwrap();
        assert_eq!(prefs.get("theme").unwrap().as_deref(), Some("light"));

        memory.deny();
        assert!(matches!(prefs.get("theme"), Err(StorageError::Denied(_))));
        assert!(prefs.set("theme", "dark").is_err());

        memory.allow();
        assert_eq!(prefs.get("theme").unwrap().as_deref(), Some("light"));
    }
}
