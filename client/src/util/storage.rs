//! Browser Web Storage helpers for JSON values.
//!
//! SYSTEM CONTEXT
//! ==============
//! The persisted session lives in `localStorage`; the in-flight federated
//! sign-in lives in `sessionStorage` so it never outlives the tab. Outside the
//! browser every call is a no-op that reads back `None`.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Which Web Storage area to address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageArea {
    Local,
    Session,
}

#[cfg(feature = "hydrate")]
fn storage(area: StorageArea) -> Option<web_sys::Storage> {
    let window = web_sys::window()?;
    match area {
        StorageArea::Local => window.local_storage().ok().flatten(),
        StorageArea::Session => window.session_storage().ok().flatten(),
    }
}

/// Load a JSON value for `key`. Missing, unreadable, or malformed entries
/// all read back as `None`.
pub fn load_json<T: DeserializeOwned>(area: StorageArea, key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let raw = storage(area)?.get_item(key).ok().flatten()?;
        decode_entry(key, &raw)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (area, key);
        None
    }
}

/// Decode a raw storage entry. Malformed JSON or a value of the wrong shape
/// reads back as `None`.
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
pub(crate) fn decode_entry<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("discarding malformed storage entry {key}: {e}");
            None
        }
    }
}

/// Save a JSON value for `key`.
pub fn save_json<T: Serialize>(area: StorageArea, key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = storage(area) else {
            return;
        };
        let Ok(raw) = serde_json::to_string(value) else {
            return;
        };
        if storage.set_item(key, &raw).is_err() {
            log::warn!("storage write failed for {key}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (area, key, value);
    }
}

/// Remove `key`.
pub fn remove(area: StorageArea, key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = storage(area) {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (area, key);
    }
}

/// Load and remove `key` in one step.
pub fn take_json<T: DeserializeOwned>(area: StorageArea, key: &str) -> Option<T> {
    let value = load_json(area, key);
    remove(area, key);
    value
}
