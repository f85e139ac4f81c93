//! Session presence detection.

use lokalwerk_conf::Settings;
use lokalwerk_http::Request;

/// Detects whether a request carries an authenticated session.
///
/// Implementations only answer presence. Token contents are never
/// interpreted or validated here.
pub trait SessionProbe: Send + Sync {
	fn has_session(&self, request: &Request) -> bool;
}

/// Probes for a non-empty session cookie by name.
///
/// # Examples
///
/// ```
/// use lokalwerk_http::Request;
/// use lokalwerk_middleware::{CookieSessionProbe, SessionProbe};
///
/// let probe = CookieSessionProbe::new("session_token");
/// let request = Request::builder()
///     .uri("/dashboard")
///     .header("cookie", "session_token=abc123")
///     .build()
///     .unwrap();
/// assert!(probe.has_session(&request));
/// ```
pub struct CookieSessionProbe {
	cookie_name: String,
}

impl CookieSessionProbe {
	pub fn new(cookie_name: impl Into<String>) -> Self {
		Self {
			cookie_name: cookie_name.into(),
		}
	}

	/// Probe for the session cookie configured in [`Settings`].
	pub fn from_settings(settings: &Settings) -> Self {
		Self::new(settings.session_cookie_name.clone())
	}
}

impl SessionProbe for CookieSessionProbe {
	fn has_session(&self, request: &Request) -> bool {
		request
			.cookie(&self.cookie_name)
			.is_some_and(|value| !value.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn request_with_cookie(header: Option<&str>) -> Request {
		let mut builder = Request::builder().uri("/");
		if let Some(header) = header {
			builder = builder.header("cookie", header);
		}
		builder.build().unwrap()
	}

	#[rstest]
	#[case(Some("session_token=abc"), true)]
	#[case(Some("a=1; session_token=abc; b=2"), true)]
	#[case(Some("session_token="), false)]
	#[case(Some("other=abc"), false)]
	#[case(None, false)]
	fn cookie_presence(#[case] header: Option<&str>, #[case] expected: bool) {
		let probe = CookieSessionProbe::new("session_token");
		assert_eq!(probe.has_session(&request_with_cookie(header)), expected);
	}

	#[test]
	fn from_settings_uses_configured_name() {
		let settings = lokalwerk_conf::Settings::default().with_session_cookie_name("sid");
		let probe = CookieSessionProbe::from_settings(&settings);
		let request = request_with_cookie(Some("sid=x"));
		assert!(probe.has_session(&request));
	}
}
