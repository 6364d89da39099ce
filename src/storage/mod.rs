//! Durable key-value storage module
//!
//! State is persisted as string-keyed entries holding JSON-encoded values.
//! The backend is injected so tests and `--ephemeral` runs can swap it out.

pub mod file_store;
pub mod memory_store;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::warn;

// Re-export main types
pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode value: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Storage port used by the timer engine and exam setup
pub trait KeyValueStore: Send + Sync {
    /// Read the raw JSON string stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the raw JSON string stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Load and decode a value, returning `None` when it is missing or malformed
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to read '{}' from storage: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring malformed stored value for '{}': {}", key, e);
            None
        }
    }
}

/// Encode and store a value
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_json_decodes_stored_scalars() {
        let store = MemoryStore::new();
        save_json(&store, "answer", &42u64).unwrap();
        save_json(&store, "flag", &true).unwrap();

        assert_eq!(load_json::<u64>(&store, "answer"), Some(42));
        assert_eq!(load_json::<bool>(&store, "flag"), Some(true));
        assert_eq!(store.get("answer").unwrap().as_deref(), Some("42"));
    }

    #[test]
    fn load_json_falls_back_on_missing_or_malformed_values() {
        let store = MemoryStore::new();
        store.set("broken", "{not json").unwrap();
        store.set("negative", "-5").unwrap();

        assert_eq!(load_json::<u64>(&store, "missing"), None);
        assert_eq!(load_json::<u64>(&store, "broken"), None);
        assert_eq!(load_json::<u64>(&store, "negative"), None);
    }
}
