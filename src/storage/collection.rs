//! Typed views over a single local storage key.

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use super::LocalStorage;
use crate::errors::AppError;

/// A list persisted as one JSON array under a fixed key.
///
/// Reads fail soft: a missing key, an unreadable row, or a value that does not parse as
/// `Vec<T>` all come back as an empty list.
pub struct PersistedCollection<T> {
    storage: LocalStorage,
    key: &'static str,
    _item: PhantomData<fn() -> T>,
}

impl<T> Clone for PersistedCollection<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            key: self.key,
            _item: PhantomData,
        }
    }
}

impl<T> PersistedCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(storage: LocalStorage, key: &'static str) -> Self {
        Self {
            storage,
            key,
            _item: PhantomData,
        }
    }

    /// Read the stored list.
    pub async fn read(&self) -> Vec<T> {
        read_json(&self.storage, self.key).await.unwrap_or_default()
    }

    /// Replace the stored list.
    pub async fn write(&self, items: &[T]) -> Result<(), AppError> {
        let value = serde_json::to_string(items)?;
        self.storage.set_item(self.key, &value).await
    }

    /// Remove the stored list; subsequent reads are empty.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.storage.remove_item(self.key).await
    }
}

/// A single optional object persisted under a fixed key.
pub struct PersistedValue<T> {
    storage: LocalStorage,
    key: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> PersistedValue<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(storage: LocalStorage, key: &'static str) -> Self {
        Self {
            storage,
            key,
            _value: PhantomData,
        }
    }

    /// Read the stored value, `None` if absent or unreadable.
    pub async fn read(&self) -> Option<T> {
        read_json(&self.storage, self.key).await
    }

    pub async fn write(&self, value: &T) -> Result<(), AppError> {
        let value = serde_json::to_string(value)?;
        self.storage.set_item(self.key, &value).await
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        self.storage.remove_item(self.key).await
    }
}

async fn read_json<V: DeserializeOwned>(storage: &LocalStorage, key: &str) -> Option<V> {
    let raw = match storage.get_item(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Discarding unparseable value under {}: {}", key, e);
            None
        }
    }
}
