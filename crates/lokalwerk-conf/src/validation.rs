//! Startup validation for settings.
//!
//! A default locale outside the supported set is a configuration error and
//! must stop the process before any request is served; consumers call
//! [`Settings::validate`] once at startup.

use crate::Settings;

/// Settings validation errors.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
	#[error("No supported locales configured")]
	NoLocales,

	#[error("Invalid locale code: '{0}'")]
	InvalidLocaleCode(String),

	#[error("Default locale '{0}' is not in the supported set")]
	DefaultNotSupported(String),

	#[error("Path '{0}' for {1} must start with '/'")]
	RelativePath(String, &'static str),
}

impl Settings {
	/// Check the settings for internal consistency.
	///
	/// # Errors
	///
	/// Returns the first inconsistency found; callers should treat any
	/// error as fatal at startup.
	///
	/// # Examples
	///
	/// ```
	/// use lokalwerk_conf::{Settings, SettingsError};
	///
	/// let bad = Settings::default().with_default_locale("xx");
	/// assert_eq!(
	///     bad.validate(),
	///     Err(SettingsError::DefaultNotSupported("xx".to_string()))
	/// );
	/// ```
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.locales.is_empty() {
			return Err(SettingsError::NoLocales);
		}
		for code in &self.locales {
			if !is_valid_code(code) {
				return Err(SettingsError::InvalidLocaleCode(code.clone()));
			}
		}
		if !self.locales.contains(&self.default_locale) {
			return Err(SettingsError::DefaultNotSupported(
				self.default_locale.clone(),
			));
		}
		for (path, field) in [
			(&self.login_path, "login_path"),
			(&self.auth_path_prefix, "auth_path_prefix"),
			(&self.post_login_redirect, "post_login_redirect"),
		] {
			if !path.starts_with('/') {
				return Err(SettingsError::RelativePath(path.clone(), field));
			}
		}
		Ok(())
	}
}

/// Locale codes are non-empty and limited to alphanumerics, hyphens, and
/// underscores. Codes are otherwise opaque; matching elsewhere is verbatim.
fn is_valid_code(code: &str) -> bool {
	!code.is_empty()
		&& code
			.chars()
			.all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}
