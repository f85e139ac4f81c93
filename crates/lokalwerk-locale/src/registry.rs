//! The supported-locale set and path-level resolution.

use serde::{Deserialize, Serialize};

use crate::LocaleError;
use lokalwerk_conf::Settings;

/// A supported locale: an opaque code plus an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
	code: String,
	display_name: Option<String>,
}

impl Locale {
	fn new(code: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			display_name: None,
		}
	}

	/// The locale code, e.g. `"de"`.
	pub fn code(&self) -> &str {
		&self.code
	}

	/// Human-readable name; falls back to the uppercased code when none is
	/// registered.
	///
	/// # Examples
	///
	/// ```
	/// use lokalwerk_locale::LocaleRegistry;
	///
	/// let registry = LocaleRegistry::builtin();
	/// assert_eq!(registry.display_name("de"), "Deutsch");
	/// assert_eq!(registry.display_name("pt"), "PT");
	/// ```
	pub fn display_name(&self) -> String {
		self.display_name
			.clone()
			.unwrap_or_else(|| self.code.to_uppercase())
	}
}

/// Ordered, immutable set of supported locales with a designated default.
///
/// The order defines the round-robin toggle sequence; the default must be a
/// member of the set, which is checked at construction and never again.
///
/// # Examples
///
/// ```
/// use lokalwerk_locale::LocaleRegistry;
///
/// let registry = LocaleRegistry::builtin();
/// assert!(registry.is_supported("en"));
/// assert_eq!(registry.default_locale().code(), "de");
/// assert_eq!(registry.next_locale("de").code(), "fr");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleRegistry {
	locales: Vec<Locale>,
	default_index: usize,
}

impl LocaleRegistry {
	/// Create a registry from locale codes and a default.
	///
	/// # Errors
	///
	/// Returns [`LocaleError::Configuration`] when the set is empty, a code
	/// is empty, a code appears twice, or the default is not a member.
	///
	/// # Examples
	///
	/// ```
	/// use lokalwerk_locale::{LocaleError, LocaleRegistry};
	///
	/// let registry = LocaleRegistry::new(["en", "it"], "it").unwrap();
	/// assert_eq!(registry.default_locale().code(), "it");
	///
	/// let err = LocaleRegistry::new(["en", "it"], "es").unwrap_err();
	/// assert!(matches!(err, LocaleError::Configuration(_)));
	/// ```
	pub fn new<I, S>(codes: I, default: &str) -> Result<Self, LocaleError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let locales: Vec<Locale> = codes.into_iter().map(Locale::new).collect();
		if locales.is_empty() {
			return Err(LocaleError::Configuration(
				"supported locale set is empty".to_string(),
			));
		}
		for (index, locale) in locales.iter().enumerate() {
			if locale.code.is_empty() {
				return Err(LocaleError::Configuration(
					"locale code is empty".to_string(),
				));
			}
			if locales[..index].iter().any(|l| l.code == locale.code) {
				return Err(LocaleError::Configuration(format!(
					"duplicate locale code '{}'",
					locale.code
				)));
			}
		}
		let default_index = locales
			.iter()
			.position(|l| l.code == default)
			.ok_or_else(|| {
				LocaleError::Configuration(format!(
					"default locale '{default}' is not in the supported set"
				))
			})?;
		Ok(Self {
			locales,
			default_index,
		})
	}

	/// The built-in registry: `en`, `de`, `fr` with `de` as default.
	pub fn builtin() -> Self {
		// The invariant (default is a member) holds by construction.
		Self {
			locales: vec![
				Locale {
					code: "en".to_string(),
					display_name: Some("English".to_string()),
				},
				Locale {
					code: "de".to_string(),
					display_name: Some("Deutsch".to_string()),
				},
				Locale {
					code: "fr".to_string(),
					display_name: Some("Français".to_string()),
				},
			],
			default_index: 1,
		}
	}

	/// Build a registry from [`Settings`], carrying over the built-in
	/// display names where codes overlap.
	///
	/// # Errors
	///
	/// Returns [`LocaleError::Configuration`] under the same conditions as
	/// [`LocaleRegistry::new`].
	pub fn from_settings(settings: &Settings) -> Result<Self, LocaleError> {
		let mut registry = Self::new(settings.locales.clone(), &settings.default_locale)?;
		for locale in &mut registry.locales {
			locale.display_name = builtin_display_name(&locale.code);
		}
		Ok(registry)
	}

	/// Register a display name for `code`. Unknown codes are ignored.
	pub fn with_display_name(mut self, code: &str, name: impl Into<String>) -> Self {
		if let Some(locale) = self.locales.iter_mut().find(|l| l.code == code) {
			locale.display_name = Some(name.into());
		}
		self
	}

	/// The supported locales, in toggle order.
	pub fn locales(&self) -> &[Locale] {
		&self.locales
	}

	/// Number of supported locales.
	pub fn len(&self) -> usize {
		self.locales.len()
	}

	/// Always false; an empty registry cannot be constructed.
	pub fn is_empty(&self) -> bool {
		self.locales.is_empty()
	}

	/// The default locale.
	pub fn default_locale(&self) -> &Locale {
		&self.locales[self.default_index]
	}

	/// Verbatim membership test.
	pub fn is_supported(&self, code: &str) -> bool {
		self.locales.iter().any(|l| l.code == code)
	}

	/// Look up a supported locale by code.
	pub fn get(&self, code: &str) -> Option<&Locale> {
		self.locales.iter().find(|l| l.code == code)
	}

	/// Display name for `code`, falling back to the uppercased code for
	/// names that were never registered and for unsupported codes.
	pub fn display_name(&self, code: &str) -> String {
		match self.get(code) {
			Some(locale) => locale.display_name(),
			None => code.to_uppercase(),
		}
	}

	/// The locale after `current` in toggle order, wrapping at the end.
	/// Unsupported input yields the default locale.
	///
	/// # Examples
	///
	/// ```
	/// use lokalwerk_locale::LocaleRegistry;
	///
	/// let registry = LocaleRegistry::builtin();
	/// assert_eq!(registry.next_locale("fr").code(), "en");
	/// assert_eq!(registry.next_locale("xx").code(), "de");
	/// ```
	pub fn next_locale(&self, current: &str) -> &Locale {
		match self.locales.iter().position(|l| l.code == current) {
			Some(index) => &self.locales[(index + 1) % self.locales.len()],
			None => self.default_locale(),
		}
	}

	/// The requested locale if supported, else the default.
	pub fn resolve(&self, requested: Option<&str>) -> &Locale {
		requested
			.and_then(|code| self.get(code))
			.unwrap_or_else(|| self.default_locale())
	}

	/// Remove a leading locale segment from a URL path.
	///
	/// Matching is case-sensitive and anchored at the first segment; locale
	/// codes elsewhere in the path are left alone. Paths without a
	/// supported prefix, including `/` and the empty path, pass through
	/// unchanged.
	///
	/// # Examples
	///
	/// ```
	/// use lokalwerk_locale::LocaleRegistry;
	///
	/// let registry = LocaleRegistry::builtin();
	/// assert_eq!(registry.strip_locale_prefix("/en/dashboard"), "/dashboard");
	/// assert_eq!(registry.strip_locale_prefix("/en"), "/");
	/// assert_eq!(registry.strip_locale_prefix("/dashboard"), "/dashboard");
	/// assert_eq!(registry.strip_locale_prefix("/xx/dashboard"), "/xx/dashboard");
	/// ```
	pub fn strip_locale_prefix<'a>(&self, path: &'a str) -> &'a str {
		for locale in &self.locales {
			let Some(rest) = path
				.strip_prefix('/')
				.and_then(|p| p.strip_prefix(locale.code()))
			else {
				continue;
			};
			if rest.is_empty() {
				return "/";
			}
			if rest.starts_with('/') {
				return rest;
			}
		}
		path
	}

	/// Compose a locale-prefixed path: `/<locale><path>`.
	///
	/// An unsupported `locale` falls back to the default; `path` is
	/// expected to start with `/`, and the root path collapses so that
	/// `("de", "/")` yields `/de` rather than `/de/`.
	pub fn locale_prefixed(&self, locale: &str, path: &str) -> String {
		let code = self.resolve(Some(locale)).code();
		if path == "/" {
			format!("/{code}")
		} else {
			format!("/{code}{path}")
		}
	}
}

fn builtin_display_name(code: &str) -> Option<String> {
	match code {
		"en" => Some("English".to_string()),
		"de" => Some("Deutsch".to_string()),
		"fr" => Some("Français".to_string()),
		_ => None,
	}
}
