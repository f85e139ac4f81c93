//! Application settings for lokalwerk.
//!
//! Centralizes the locale set, default locale, routing paths, and storage
//! keys the other crates consume. Settings are plain data: build them with
//! [`Settings::default`], override fields with the builder methods, or load
//! overrides from the environment with [`Settings::from_env`]. Consumers
//! expose `from_settings` constructors rather than reading settings
//! globally.

mod env;
mod validation;

pub use env::EnvSource;
pub use validation::SettingsError;

use serde::{Deserialize, Serialize};

/// Application settings.
///
/// The defaults mirror a three-locale deployment with German as the
/// default language and the usual auth-flow paths.
///
/// # Examples
///
/// ```
/// use lokalwerk_conf::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.locales, vec!["en", "de", "fr"]);
/// assert_eq!(settings.default_locale, "de");
/// assert!(settings.validate().is_ok());
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
	/// Supported locale codes, in toggle order.
	pub locales: Vec<String>,
	/// Default locale; must be a member of `locales`.
	pub default_locale: String,
	/// Currency code used when a caller does not name one.
	pub default_currency: String,
	/// Name of the cookie whose presence marks an authenticated session.
	pub session_cookie_name: String,
	/// Key under which the anonymous locale preference is stored.
	pub preference_key: String,
	/// Locale-relative login page path.
	pub login_path: String,
	/// Path prefix (after locale stripping) that marks auth-flow pages.
	pub auth_path_prefix: String,
	/// Locale-relative destination after a successful login.
	pub post_login_redirect: String,
	/// Paths reachable without a session. Entries are matched against the
	/// locale-stripped path; a trailing `/*` makes an entry a prefix match.
	pub public_paths: Vec<String>,
	/// Query parameter carrying the originally requested path on login
	/// redirects.
	pub callback_param: String,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			locales: vec!["en".to_string(), "de".to_string(), "fr".to_string()],
			default_locale: "de".to_string(),
			default_currency: "EUR".to_string(),
			session_cookie_name: "session_token".to_string(),
			preference_key: "user-locale".to_string(),
			login_path: "/auth/login".to_string(),
			auth_path_prefix: "/auth/".to_string(),
			post_login_redirect: "/dashboard".to_string(),
			public_paths: vec!["/".to_string(), "/auth/*".to_string()],
			callback_param: "callbackUrl".to_string(),
		}
	}
}

impl Settings {
	/// Load settings from the environment, starting from the defaults and
	/// validating the result.
	///
	/// Recognized variables are listed on [`EnvSource`].
	///
	/// # Errors
	///
	/// Returns [`SettingsError`] when an override leaves the settings
	/// inconsistent, e.g. a default locale outside the supported set.
	pub fn from_env() -> Result<Self, SettingsError> {
		let settings = EnvSource::system().apply(Self::default());
		settings.validate()?;
		Ok(settings)
	}

	/// Replace the supported locale set.
	///
	/// # Examples
	///
	/// ```
	/// use lokalwerk_conf::Settings;
	///
	/// let settings = Settings::default()
	///     .with_locales(vec!["en".to_string(), "it".to_string()])
	///     .with_default_locale("it");
	/// assert!(settings.validate().is_ok());
	/// ```
	pub fn with_locales(mut self, locales: Vec<String>) -> Self {
		self.locales = locales;
		self
	}

	/// Set the default locale.
	pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
		self.default_locale = locale.into();
		self
	}

	/// Set the default currency code.
	pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
		self.default_currency = currency.into();
		self
	}

	/// Set the session cookie name.
	pub fn with_session_cookie_name(mut self, name: impl Into<String>) -> Self {
		self.session_cookie_name = name.into();
		self
	}

	/// Set the anonymous preference storage key.
	pub fn with_preference_key(mut self, key: impl Into<String>) -> Self {
		self.preference_key = key.into();
		self
	}

	/// Replace the public path allow-list.
	pub fn with_public_paths(mut self, paths: Vec<String>) -> Self {
		self.public_paths = paths;
		self
	}

	/// Set the locale-relative destination used after login.
	pub fn with_post_login_redirect(mut self, path: impl Into<String>) -> Self {
		self.post_login_redirect = path.into();
		self
	}
}
