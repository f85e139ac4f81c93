//! lokalwerk: locale resolution, preference persistence, and localized
//! request gating for web applications.
//!
//! This crate is a facade over the workspace members:
//!
//! - [`conf`] — application settings and validation
//! - [`locale`] — the locale registry, resolver, and negotiation
//! - [`format`] — locale-aware date, number, and currency formatting
//! - [`prefs`] — anonymous and authenticated locale preferences
//! - [`http`] — request/response types and middleware composition
//! - [`middleware`] — the routing gate and locale-redirect middleware
//!
//! # Examples
//!
//! ```
//! use lokalwerk::prelude::*;
//!
//! let registry = LocaleRegistry::builtin();
//! assert_eq!(registry.next_locale("de").code(), "fr");
//! assert_eq!(registry.strip_locale_prefix("/en/dashboard"), "/dashboard");
//! ```

pub use lokalwerk_conf as conf;
pub use lokalwerk_format as format;
pub use lokalwerk_http as http;
pub use lokalwerk_locale as locale;
pub use lokalwerk_middleware as middleware;
pub use lokalwerk_prefs as prefs;

/// The names most applications need, in one import.
pub mod prelude {
	pub use lokalwerk_conf::Settings;
	pub use lokalwerk_format::{
		DateInput, DateTimeOptions, NumberOptions, format_currency, format_date, format_datetime,
		format_number, format_percentage, format_time,
	};
	pub use lokalwerk_http::{Handler, Middleware, MiddlewareChain, Request, Response};
	pub use lokalwerk_locale::{Locale, LocaleRegistry};
	pub use lokalwerk_middleware::{
		CookieSessionProbe, LocaleRedirectMiddleware, PublicPaths, RoutingDecision, RoutingGate,
		SessionProbe,
	};
	pub use lokalwerk_prefs::{ClientStorage, MemoryStorage, PreferenceStore};
}
