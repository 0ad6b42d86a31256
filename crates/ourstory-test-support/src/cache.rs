//! Test cache — a `KeyValueStore` whose writes always fail.

use ourstory_core::cache::KeyValueStore;
use ourstory_core::error::DomainError;

/// A key-value store that is always empty and rejects every write. Useful for
/// checking that cache failures are not propagated.
#[derive(Debug)]
pub struct FailingKeyValueStore;

impl KeyValueStore for FailingKeyValueStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("storage quota exceeded".into()))
    }
}
