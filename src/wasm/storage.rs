//! LocalPreferences: `localStorage` through gloo
//!
//! Values are stored as the bare strings handed in, so a key written by a
//! plain page script reads back unchanged. Browsers can refuse storage
//! outright (privacy modes, sandboxed frames); that surfaces as
//! `StorageError`, never as a thrown exception.

use gloo::storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;

use crate::error::{StorageError, StorageResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPreferences;

impl LocalPreferences {
    pub fn new() -> Self { Self }

    /// gloo throws when storage is missing, so check for it first
    fn available() -> StorageResult<()> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        match window.local_storage() {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(StorageError::Unavailable("localStorage disabled".into())),
            Err(e) => Err(denied(e)),
        }
    }

    pub fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Self::available()?;
        LocalStorage::raw().get_item(key).map_err(denied)
    }

    pub fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        Self::available()?;
        LocalStorage::raw().set_item(key, value).map_err(denied)
    }
}

fn denied(e: JsValue) -> StorageError {
    StorageError::Denied(format!("{:?}", e))
}
