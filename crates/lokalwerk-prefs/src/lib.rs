//! Locale preference persistence.
//!
//! A [`PreferenceStore`] remembers which locale a subject chose. Anonymous
//! subjects are backed by client-persistent key-value storage under a
//! single well-known key; authenticated subjects go through a
//! [`UserPreferenceBackend`], whose server-side implementation lives with
//! the user-profile store and is stubbed here.
//!
//! Error policy, by kind:
//! - an unsupported locale code is a caller error, rejected loudly with
//!   [`PreferenceError::InvalidLocale`] before anything is written;
//! - a missing or broken storage medium is environmental: writes report
//!   `Ok(false)`, reads report `None`, and a warning is logged (losing a
//!   language preference is not user-blocking).
//!
//! The store is constructed per context with its registry and backends
//! injected; there is no global instance.

mod storage;

pub use storage::{ClientStorage, MemoryStorage, StorageError};

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use lokalwerk_conf::Settings;
use lokalwerk_locale::LocaleRegistry;

/// Default storage key for the anonymous locale preference.
pub const PREFERENCE_KEY: &str = "user-locale";

/// Errors surfaced by the preference store.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreferenceError {
	/// The requested locale is not in the supported set.
	#[error("Unsupported locale: '{0}'")]
	InvalidLocale(String),

	/// The authenticated backend failed in a way it chose to surface.
	#[error("preference backend error: {0}")]
	Backend(String),
}

/// Server-side persistence for authenticated subjects.
///
/// The core does not implement a user-profile store; applications plug
/// their own backend in, and [`NullPreferenceBackend`] stands in until
/// they do.
#[async_trait]
pub trait UserPreferenceBackend: Send + Sync {
	/// Persist `locale` for `user_id`. `Ok(false)` means the backend
	/// declined to persist (e.g. it is a stub).
	async fn set_for_user(&self, user_id: &str, locale: &str) -> Result<bool, PreferenceError>;

	/// Fetch the stored locale for `user_id`, if any.
	async fn get_for_user(&self, user_id: &str) -> Result<Option<String>, PreferenceError>;
}

/// Backend stub: persists nothing and says so.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPreferenceBackend;

#[async_trait]
impl UserPreferenceBackend for NullPreferenceBackend {
	async fn set_for_user(&self, user_id: &str, locale: &str) -> Result<bool, PreferenceError> {
		debug!(user_id, locale, "no user preference backend configured; preference not persisted");
		Ok(false)
	}

	async fn get_for_user(&self, user_id: &str) -> Result<Option<String>, PreferenceError> {
		debug!(user_id, "no user preference backend configured");
		Ok(None)
	}
}

/// Locale preference store.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use lokalwerk_locale::LocaleRegistry;
/// use lokalwerk_prefs::{MemoryStorage, PreferenceStore};
///
/// let registry = Arc::new(LocaleRegistry::builtin());
/// let store = PreferenceStore::new(registry, MemoryStorage::new());
///
/// assert_eq!(store.set_anonymous("en"), Ok(true));
/// assert_eq!(store.get_anonymous(), Some("en".to_string()));
/// assert!(store.set_anonymous("zz").is_err());
/// ```
pub struct PreferenceStore<S: ClientStorage> {
	registry: Arc<LocaleRegistry>,
	storage: S,
	backend: Arc<dyn UserPreferenceBackend>,
	key: String,
	log_degraded: bool,
}

impl<S: ClientStorage> PreferenceStore<S> {
	/// Create a store over `storage` with the stub authenticated backend
	/// and the default storage key.
	pub fn new(registry: Arc<LocaleRegistry>, storage: S) -> Self {
		Self {
			registry,
			storage,
			backend: Arc::new(NullPreferenceBackend),
			key: PREFERENCE_KEY.to_string(),
			log_degraded: true,
		}
	}

	/// Create a store with the storage key from [`Settings`].
	pub fn from_settings(registry: Arc<LocaleRegistry>, storage: S, settings: &Settings) -> Self {
		Self::new(registry, storage).with_key(settings.preference_key.clone())
	}

	/// Override the storage key.
	pub fn with_key(mut self, key: impl Into<String>) -> Self {
		self.key = key.into();
		self
	}

	/// Plug in a server-side backend for authenticated subjects.
	pub fn with_backend(mut self, backend: Arc<dyn UserPreferenceBackend>) -> Self {
		self.backend = backend;
		self
	}

	/// Disable degradation warnings; results are unchanged.
	pub fn quiet(mut self) -> Self {
		self.log_degraded = false;
		self
	}

	/// Persist the anonymous preference.
	///
	/// Validates before writing, so a rejected call leaves storage
	/// untouched. `Ok(false)` means storage was unavailable and nothing
	/// was persisted.
	///
	/// # Errors
	///
	/// [`PreferenceError::InvalidLocale`] when `locale` is unsupported.
	pub fn set_anonymous(&self, locale: &str) -> Result<bool, PreferenceError> {
		self.validate(locale)?;
		match self.storage.set(&self.key, locale) {
			Ok(()) => Ok(true),
			Err(err) => {
				if self.log_degraded {
					warn!(locale, error = %err, "could not persist anonymous locale preference");
				}
				Ok(false)
			}
		}
	}

	/// Read the anonymous preference. Storage trouble degrades to `None`.
	pub fn get_anonymous(&self) -> Option<String> {
		match self.storage.get(&self.key) {
			Ok(value) => value,
			Err(err) => {
				if self.log_degraded {
					warn!(error = %err, "could not read anonymous locale preference");
				}
				None
			}
		}
	}

	/// Clear the anonymous preference. Reports whether the removal went
	/// through.
	pub fn clear_anonymous(&self) -> bool {
		match self.storage.remove(&self.key) {
			Ok(()) => true,
			Err(err) => {
				if self.log_degraded {
					warn!(error = %err, "could not clear anonymous locale preference");
				}
				false
			}
		}
	}

	/// Persist a preference for either subject kind.
	///
	/// Validation happens before dispatch, so neither path sees an
	/// unsupported code.
	///
	/// # Errors
	///
	/// [`PreferenceError::InvalidLocale`] for unsupported codes; backend
	/// errors are environmental and degrade to `Ok(false)`.
	pub async fn set_preference(
		&self,
		user_id: Option<&str>,
		locale: &str,
	) -> Result<bool, PreferenceError> {
		self.validate(locale)?;
		match user_id {
			Some(user_id) => match self.backend.set_for_user(user_id, locale).await {
				Ok(persisted) => Ok(persisted),
				Err(err) => {
					if self.log_degraded {
						warn!(user_id, error = %err, "user preference backend failed on write");
					}
					Ok(false)
				}
			},
			None => self.set_anonymous(locale),
		}
	}

	/// Read a preference for either subject kind; degrades to `None`.
	pub async fn get_preference(&self, user_id: Option<&str>) -> Option<String> {
		match user_id {
			Some(user_id) => match self.backend.get_for_user(user_id).await {
				Ok(value) => value,
				Err(err) => {
					if self.log_degraded {
						warn!(user_id, error = %err, "user preference backend failed on read");
					}
					None
				}
			},
			None => self.get_anonymous(),
		}
	}

	fn validate(&self, locale: &str) -> Result<(), PreferenceError> {
		if self.registry.is_supported(locale) {
			Ok(())
		} else {
			Err(PreferenceError::InvalidLocale(locale.to_string()))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicBool, Ordering};

	/// Storage whose write path can be broken at will; reads keep working
	/// so tests can observe what survived.
	struct FlakyStorage {
		inner: MemoryStorage,
		fail_writes: AtomicBool,
	}

	impl FlakyStorage {
		fn new() -> Self {
			Self {
				inner: MemoryStorage::new(),
				fail_writes: AtomicBool::new(false),
			}
		}
	}

	impl ClientStorage for FlakyStorage {
		fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
			self.inner.get(key)
		}

		fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
			if self.fail_writes.load(Ordering::Relaxed) {
				return Err(StorageError::Backend("write failed".to_string()));
			}
			self.inner.set(key, value)
		}

		fn remove(&self, key: &str) -> Result<(), StorageError> {
			if self.fail_writes.load(Ordering::Relaxed) {
				return Err(StorageError::Backend("write failed".to_string()));
			}
			self.inner.remove(key)
		}
	}

	/// Storage medium that does not exist at all.
	struct AbsentStorage;

	impl ClientStorage for AbsentStorage {
		fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
			Err(StorageError::Unavailable("no storage medium".to_string()))
		}

		fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
			Err(StorageError::Unavailable("no storage medium".to_string()))
		}

		fn remove(&self, _key: &str) -> Result<(), StorageError> {
			Err(StorageError::Unavailable("no storage medium".to_string()))
		}
	}

	fn store<S: ClientStorage>(storage: S) -> PreferenceStore<S> {
		PreferenceStore::new(Arc::new(LocaleRegistry::builtin()), storage).quiet()
	}

	#[test]
	fn set_and_get_anonymous() {
		let store = store(MemoryStorage::new());
		assert_eq!(store.set_anonymous("en"), Ok(true));
		assert_eq!(store.get_anonymous(), Some("en".to_string()));
	}

	#[test]
	fn unsupported_code_is_rejected_before_any_write() {
		let store = store(MemoryStorage::new());
		store.set_anonymous("en").unwrap();

		let err = store.set_anonymous("zz").unwrap_err();
		assert_eq!(err, PreferenceError::InvalidLocale("zz".to_string()));
		assert_eq!(store.get_anonymous(), Some("en".to_string()));
	}

	#[test]
	fn failing_write_leaves_prior_value_intact() {
		let store = store(FlakyStorage::new());
		store.set_anonymous("en").unwrap();
		store.storage.fail_writes.store(true, Ordering::Relaxed);

		assert_eq!(store.set_anonymous("fr"), Ok(false));
		assert_eq!(store.get_anonymous(), Some("en".to_string()));
	}

	#[test]
	fn absent_storage_degrades_everywhere() {
		let store = store(AbsentStorage);
		assert_eq!(store.set_anonymous("en"), Ok(false));
		assert_eq!(store.get_anonymous(), None);
		assert!(!store.clear_anonymous());
	}

	#[test]
	fn validation_still_wins_over_absent_storage() {
		let store = store(AbsentStorage);
		assert!(store.set_anonymous("zz").is_err());
	}

	#[test]
	fn clear_removes_the_preference() {
		let store = store(MemoryStorage::new());
		store.set_anonymous("fr").unwrap();
		assert!(store.clear_anonymous());
		assert_eq!(store.get_anonymous(), None);
	}

	#[test]
	fn custom_key_is_used() {
		let storage = MemoryStorage::new();
		storage.set("user-locale", "stale").unwrap();
		let store =
			PreferenceStore::new(Arc::new(LocaleRegistry::builtin()), storage).with_key("locale");
		store.set_anonymous("fr").unwrap();
		assert_eq!(store.storage.get("locale").unwrap(), Some("fr".to_string()));
		assert_eq!(store.storage.get("user-locale").unwrap(), Some("stale".to_string()));
	}

	#[tokio::test]
	async fn anonymous_dispatch_through_the_facade() {
		let store = store(MemoryStorage::new());
		assert_eq!(store.set_preference(None, "en").await, Ok(true));
		assert_eq!(store.get_preference(None).await, Some("en".to_string()));
	}

	#[tokio::test]
	async fn null_backend_reports_nothing_persisted() {
		let store = store(MemoryStorage::new());
		assert_eq!(store.set_preference(Some("user-1"), "en").await, Ok(false));
		assert_eq!(store.get_preference(Some("user-1")).await, None);
		// The anonymous slot is untouched by the authenticated path.
		assert_eq!(store.get_anonymous(), None);
	}

	#[tokio::test]
	async fn authenticated_path_validates_first() {
		let store = store(MemoryStorage::new());
		let err = store.set_preference(Some("user-1"), "zz").await.unwrap_err();
		assert_eq!(err, PreferenceError::InvalidLocale("zz".to_string()));
	}

	struct RecordingBackend {
		stored: std::sync::Mutex<Option<(String, String)>>,
	}

	#[async_trait]
	impl UserPreferenceBackend for RecordingBackend {
		async fn set_for_user(&self, user_id: &str, locale: &str) -> Result<bool, PreferenceError> {
			let mut stored = self.stored.lock().unwrap_or_else(|e| e.into_inner());
			*stored = Some((user_id.to_string(), locale.to_string()));
			Ok(true)
		}

		async fn get_for_user(&self, user_id: &str) -> Result<Option<String>, PreferenceError> {
			let stored = self.stored.lock().unwrap_or_else(|e| e.into_inner());
			Ok(stored
				.as_ref()
				.filter(|(stored_user, _)| stored_user == user_id)
				.map(|(_, locale)| locale.clone()))
		}
	}

	#[tokio::test]
	async fn custom_backend_receives_authenticated_writes() {
		let backend = Arc::new(RecordingBackend {
			stored: std::sync::Mutex::new(None),
		});
		let store = store(MemoryStorage::new()).with_backend(backend);

		assert_eq!(store.set_preference(Some("user-1"), "fr").await, Ok(true));
		assert_eq!(
			store.get_preference(Some("user-1")).await,
			Some("fr".to_string())
		);
		assert_eq!(store.get_preference(Some("user-2")).await, None);
	}
}
