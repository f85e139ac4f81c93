//! Environment-variable source for [`Settings`](crate::Settings).

use std::collections::HashMap;

use crate::Settings;

/// Variables recognized by [`EnvSource`]:
///
/// | Variable | Field | Format |
/// |----------|-------|--------|
/// | `LOKALWERK_LOCALES` | `locales` | comma-separated codes |
/// | `LOKALWERK_DEFAULT_LOCALE` | `default_locale` | code |
/// | `LOKALWERK_DEFAULT_CURRENCY` | `default_currency` | ISO 4217 code |
/// | `LOKALWERK_SESSION_COOKIE` | `session_cookie_name` | cookie name |
/// | `LOKALWERK_PREFERENCE_KEY` | `preference_key` | storage key |
/// | `LOKALWERK_LOGIN_PATH` | `login_path` | locale-relative path |
/// | `LOKALWERK_AUTH_PREFIX` | `auth_path_prefix` | path prefix |
/// | `LOKALWERK_POST_LOGIN_REDIRECT` | `post_login_redirect` | locale-relative path |
/// | `LOKALWERK_PUBLIC_PATHS` | `public_paths` | comma-separated paths |
/// | `LOKALWERK_CALLBACK_PARAM` | `callback_param` | query parameter name |
///
/// An `EnvSource` is a snapshot of variable values; `apply` folds the
/// overrides into an existing `Settings`. Tests construct sources from
/// plain pairs instead of mutating the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
	vars: HashMap<String, String>,
}

const RECOGNIZED: &[&str] = &[
	"LOKALWERK_LOCALES",
	"LOKALWERK_DEFAULT_LOCALE",
	"LOKALWERK_DEFAULT_CURRENCY",
	"LOKALWERK_SESSION_COOKIE",
	"LOKALWERK_PREFERENCE_KEY",
	"LOKALWERK_LOGIN_PATH",
	"LOKALWERK_AUTH_PREFIX",
	"LOKALWERK_POST_LOGIN_REDIRECT",
	"LOKALWERK_PUBLIC_PATHS",
	"LOKALWERK_CALLBACK_PARAM",
];

impl EnvSource {
	/// Snapshot the recognized variables from the process environment.
	pub fn system() -> Self {
		let vars = RECOGNIZED
			.iter()
			.filter_map(|name| std::env::var(name).ok().map(|v| (name.to_string(), v)))
			.collect();
		Self { vars }
	}

	/// Build a source from explicit pairs.
	///
	/// # Examples
	///
	/// ```
	/// use lokalwerk_conf::{EnvSource, Settings};
	///
	/// let source = EnvSource::from_pairs([
	///     ("LOKALWERK_DEFAULT_LOCALE", "en"),
	///     ("LOKALWERK_LOCALES", "en, fr"),
	/// ]);
	/// let settings = source.apply(Settings::default());
	/// assert_eq!(settings.default_locale, "en");
	/// assert_eq!(settings.locales, vec!["en", "fr"]);
	/// ```
	pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		let vars = pairs
			.into_iter()
			.map(|(k, v)| (k.into(), v.into()))
			.collect();
		Self { vars }
	}

	/// Fold the overrides present in this source into `settings`.
	///
	/// Unset variables leave the corresponding field untouched; the result
	/// is not validated here.
	pub fn apply(&self, mut settings: Settings) -> Settings {
		if let Some(value) = self.vars.get("LOKALWERK_LOCALES") {
			settings.locales = split_list(value);
		}
		if let Some(value) = self.vars.get("LOKALWERK_DEFAULT_LOCALE") {
			settings.default_locale = value.trim().to_string();
		}
		if let Some(value) = self.vars.get("LOKALWERK_DEFAULT_CURRENCY") {
			settings.default_currency = value.trim().to_string();
		}
		if let Some(value) = self.vars.get("LOKALWERK_SESSION_COOKIE") {
			settings.session_cookie_name = value.trim().to_string();
		}
		if let Some(value) = self.vars.get("LOKALWERK_PREFERENCE_KEY") {
			settings.preference_key = value.trim().to_string();
		}
		if let Some(value) = self.vars.get("LOKALWERK_LOGIN_PATH") {
			settings.login_path = value.trim().to_string();
		}
		if let Some(value) = self.vars.get("LOKALWERK_AUTH_PREFIX") {
			settings.auth_path_prefix = value.trim().to_string();
		}
		if let Some(value) = self.vars.get("LOKALWERK_POST_LOGIN_REDIRECT") {
			settings.post_login_redirect = value.trim().to_string();
		}
		if let Some(value) = self.vars.get("LOKALWERK_PUBLIC_PATHS") {
			settings.public_paths = split_list(value);
		}
		if let Some(value) = self.vars.get("LOKALWERK_CALLBACK_PARAM") {
			settings.callback_param = value.trim().to_string();
		}
		settings
	}
}

/// Split a comma-separated list, trimming entries and dropping empties.
fn split_list(value: &str) -> Vec<String> {
	value
		.split(',')
		.map(str::trim)
		.filter(|entry| !entry.is_empty())
		.map(str::to_string)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("en,de,fr", vec!["en", "de", "fr"])]
	#[case(" en , de ", vec!["en", "de"])]
	#[case("en,,de", vec!["en", "de"])]
	#[case("", Vec::<&str>::new())]
	fn list_splitting(#[case] input: &str, #[case] expected: Vec<&str>) {
		assert_eq!(split_list(input), expected);
	}

	#[test]
	fn empty_source_leaves_defaults() {
		let settings = EnvSource::default().apply(Settings::default());
		assert_eq!(settings, Settings::default());
	}

	#[test]
	fn overrides_replace_only_named_fields() {
		let source = EnvSource::from_pairs([
			("LOKALWERK_DEFAULT_CURRENCY", "CHF"),
			("LOKALWERK_PUBLIC_PATHS", "/,/about,/auth/*"),
		]);
		let settings = source.apply(Settings::default());
		assert_eq!(settings.default_currency, "CHF");
		assert_eq!(settings.public_paths, vec!["/", "/about", "/auth/*"]);
		assert_eq!(settings.default_locale, "de");
	}

	#[test]
	fn unrecognized_pairs_are_ignored() {
		let source = EnvSource::from_pairs([("SOMETHING_ELSE", "x")]);
		assert_eq!(source.apply(Settings::default()), Settings::default());
	}
}
