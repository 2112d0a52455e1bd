//! Typed JSON helpers over a [`LocalStore`].

use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::local::LocalStore;

/// Load a JSON blob. Returns `None` if the key has never been written.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn LocalStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Replace the JSON blob stored under `key`.
pub fn save_json<T: Serialize>(
    store: &dyn LocalStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Load a JSON array blob, treating a missing key as empty.
pub fn load_list<T: DeserializeOwned>(
    store: &dyn LocalStore,
    key: &str,
) -> Result<Vec<T>, StorageError> {
    Ok(load_json(store, key)?.unwrap_or_default())
}

/// Append one item to a JSON array blob. Returns the new length.
pub fn append_json<T: Serialize + DeserializeOwned>(
    store: &dyn LocalStore,
    key: &str,
    item: T,
) -> Result<usize, StorageError> {
    let mut items: Vec<T> = load_list(store, key)?;
    items.push(item);
    save_json(store, key, &items)?;
    Ok(items.len())
}
