//! Locale registry and resolution.
//!
//! The [`LocaleRegistry`] owns the ordered, immutable set of supported
//! locales and is the single source of truth every other crate reads from.
//! On top of the set it implements resolution: membership tests, the cyclic
//! toggle order, locale-prefix handling for URL paths, and q-weighted
//! `Accept-Language` negotiation.
//!
//! Locale codes are opaque strings compared verbatim. There is no
//! case-folding and no BCP-47 normalization; `en` and `EN` are different
//! codes. The one place a wider tag is interpreted is negotiation, where an
//! inbound range like `en-US;q=0.8` may select the supported code `en`
//! through its primary subtag.

mod negotiate;
mod registry;

pub use registry::{Locale, LocaleRegistry};

/// Locale-level errors.
///
/// Both variants indicate programming or configuration mistakes and are
/// surfaced to the caller; neither is recovered silently.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
	/// A caller named a locale code outside the supported set.
	#[error("Unsupported locale: '{0}'")]
	InvalidLocale(String),

	/// The registry configuration is inconsistent; fatal at startup.
	#[error("Invalid locale configuration: {0}")]
	Configuration(String),
}
