//! Durable key-value storage behind the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store persists its token and identity through
//! [`KeyValueStore`] so the same restore/establish/clear logic runs against
//! browser `localStorage` in hydrate builds and against [`MemoryStorage`] in
//! native tests.
//!
//! TRADE-OFFS
//! ==========
//! Writes are best effort. A browser that refuses storage (private mode,
//! quota) keeps the in-memory session alive for the current page and simply
//! fails to restore it after a reload.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Synchronous string key-value store with `localStorage` semantics.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str);
    /// Delete `key`; missing keys are ignored.
    fn remove_item(&self, key: &str);
}

/// Browser `window.localStorage`. Without the `hydrate` feature every call
/// is a no-op so SSR output stays deterministic.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
fn browser_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            browser_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = browser_storage() else {
                leptos::logging::warn!("localStorage unavailable; {key} not persisted");
                return;
            };
            if storage.set_item(key, value).is_err() {
                leptos::logging::warn!("localStorage rejected write to {key}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = browser_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Process-local store used by tests and non-browser embedders.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) {
        (**self).set_item(key, value);
    }

    fn remove_item(&self, key: &str) {
        (**self).remove_item(key);
    }
}

/// Load and decode a JSON value stored under `key`.
///
/// Returns `None` when the key is missing or empty; `Some(Err(_))` when it
/// holds a value that does not decode as `T`.
pub fn load_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Option<Result<T, serde_json::Error>> {
    let raw = store.get_item(key).filter(|raw| !raw.is_empty())?;
    Some(serde_json::from_str(&raw))
}

/// Encode `value` as JSON and store it under `key`.
pub fn save_json<T: Serialize>(store: &impl KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set_item(key, &raw),
        Err(e) => leptos::logging::warn!("failed to encode {key}: {e}"),
    }
}
