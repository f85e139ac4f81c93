//! Redirects unprefixed requests to their resolved locale.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use lokalwerk_conf::Settings;
use lokalwerk_http::{Handler, Middleware, Request, Response, Result};
use lokalwerk_locale::LocaleRegistry;

/// Middleware that rewrites paths without a supported locale prefix.
///
/// Requests already carrying a prefix pass through unchanged. For the rest,
/// the target locale is resolved in order: the anonymous preference cookie,
/// `Accept-Language` negotiation, then the registry default. The redirect is
/// a 307 preserving path, query, and method.
///
/// Intended to run in front of [`crate::RoutingGate`], which then always
/// sees prefixed paths.
pub struct LocaleRedirectMiddleware {
	registry: Arc<LocaleRegistry>,
	preference_key: String,
}

impl LocaleRedirectMiddleware {
	/// Redirect using the well-known `user-locale` preference cookie.
	pub fn new(registry: Arc<LocaleRegistry>) -> Self {
		Self::from_settings(registry, &Settings::default())
	}

	pub fn from_settings(registry: Arc<LocaleRegistry>, settings: &Settings) -> Self {
		Self {
			registry,
			preference_key: settings.preference_key.clone(),
		}
	}

	fn resolve_locale(&self, request: &Request) -> String {
		if let Some(preferred) = request.cookie(&self.preference_key)
			&& self.registry.is_supported(&preferred)
		{
			return preferred;
		}
		if let Some(header) = request.header("accept-language")
			&& let Some(negotiated) = self.registry.negotiate(header)
		{
			return negotiated.code().to_string();
		}
		self.registry.default_locale().code().to_string()
	}
}

#[async_trait]
impl Middleware for LocaleRedirectMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let path = request.path();
		if self.registry.strip_locale_prefix(path) != path {
			return next.handle(request).await;
		}

		let locale = self.resolve_locale(&request);
		let mut location = self.registry.locale_prefixed(&locale, path);
		if let Some(query) = request.query() {
			location = format!("{location}?{query}");
		}
		debug!(path, %locale, %location, "locale redirect");
		Response::temporary_redirect(&location)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use hyper::StatusCode;
	use rstest::rstest;

	struct Marker;

	#[async_trait]
	impl Handler for Marker {
		async fn handle(&self, _request: Request) -> Result<Response> {
			Ok(Response::ok().with_body("served"))
		}
	}

	fn middleware() -> LocaleRedirectMiddleware {
		LocaleRedirectMiddleware::new(Arc::new(LocaleRegistry::builtin()))
	}

	async fn run(request: Request) -> Response {
		middleware().process(request, Arc::new(Marker)).await.unwrap()
	}

	#[tokio::test]
	async fn prefixed_paths_pass_through() {
		let request = Request::builder().uri("/de/dashboard").build().unwrap();
		let response = run(request).await;
		assert_eq!(response.status, StatusCode::OK);
	}

	#[rstest]
	#[case("/", "/de")]
	#[case("/dashboard", "/de/dashboard")]
	#[case("/dashboard?tab=2", "/de/dashboard?tab=2")]
	#[tokio::test]
	async fn unprefixed_paths_redirect_to_default(
		#[case] uri: &str,
		#[case] expected: &str,
	) {
		let request = Request::builder().uri(uri).build().unwrap();
		let response = run(request).await;
		assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
		assert_eq!(response.location(), Some(expected));
	}

	#[tokio::test]
	async fn preference_cookie_wins() {
		let request = Request::builder()
			.uri("/dashboard")
			.header("cookie", "user-locale=fr")
			.header("accept-language", "en")
			.build()
			.unwrap();
		let response = run(request).await;
		assert_eq!(response.location(), Some("/fr/dashboard"));
	}

	#[tokio::test]
	async fn unsupported_cookie_falls_back_to_header() {
		let request = Request::builder()
			.uri("/dashboard")
			.header("cookie", "user-locale=xx")
			.header("accept-language", "en-US,en;q=0.9")
			.build()
			.unwrap();
		let response = run(request).await;
		assert_eq!(response.location(), Some("/en/dashboard"));
	}

	#[tokio::test]
	async fn unmatchable_header_falls_back_to_default() {
		let request = Request::builder()
			.uri("/dashboard")
			.header("accept-language", "ja,ko;q=0.8")
			.build()
			.unwrap();
		let response = run(request).await;
		assert_eq!(response.location(), Some("/de/dashboard"));
	}
}
