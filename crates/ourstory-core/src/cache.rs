//! Key-value cache abstraction for the last-seen story.
//!
//! Resolution persists the most recently resolved story and its identifier
//! under the keys below so that a later load without link parameters can
//! recover it.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::DomainError;

/// Cache key holding the last resolved story as long-key JSON.
pub const STORY_DATA_KEY: &str = "ourstory.story";

/// Cache key holding the last story identifier seen in a link.
pub const STORY_ID_KEY: &str = "ourstory.story_id";

/// A string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the value cannot be stored.
    fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
}

/// Process-local `KeyValueStore` backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("cache lock poisoned: {e}")))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
