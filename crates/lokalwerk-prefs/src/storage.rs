//! Client-persistent key-value storage.
//!
//! The storage medium on a client can be absent or broken (privacy modes,
//! quota errors), so every operation is fallible and the preference store
//! treats failures as an environmental condition, not a caller error.

use std::collections::HashMap;
use std::sync::RwLock;

/// Storage-level errors. Always recovered by the preference store; never
/// surfaced to its callers.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
	/// The storage medium does not exist in this environment.
	#[error("storage unavailable: {0}")]
	Unavailable(String),

	/// The medium exists but the operation failed.
	#[error("storage backend error: {0}")]
	Backend(String),
}

/// Key-value storage scoped to a single client.
///
/// Implementations are expected to be cheap and non-atomic across
/// concurrent writers; last write wins.
pub trait ClientStorage: Send + Sync {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
	fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
	fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage backend.
///
/// # Examples
///
/// ```
/// use lokalwerk_prefs::{ClientStorage, MemoryStorage};
///
/// let storage = MemoryStorage::new();
/// storage.set("user-locale", "en").unwrap();
/// assert_eq!(storage.get("user-locale").unwrap(), Some("en".to_string()));
/// storage.remove("user-locale").unwrap();
/// assert_eq!(storage.get("user-locale").unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStorage {
	entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}
}

impl ClientStorage for MemoryStorage {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
		Ok(entries.get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
		entries.insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
		entries.remove(key);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn memory_storage_round_trip() {
		let storage = MemoryStorage::new();
		assert_eq!(storage.get("k").unwrap(), None);
		storage.set("k", "v1").unwrap();
		storage.set("k", "v2").unwrap();
		assert_eq!(storage.get("k").unwrap(), Some("v2".to_string()));
		storage.remove("k").unwrap();
		assert_eq!(storage.get("k").unwrap(), None);
	}

	#[test]
	fn remove_of_missing_key_is_fine() {
		let storage = MemoryStorage::new();
		assert!(storage.remove("missing").is_ok());
	}
}
