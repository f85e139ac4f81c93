//! The routing gate: session-aware request gating with locale-preserving
//! redirects.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use lokalwerk_conf::Settings;
use lokalwerk_http::{Handler, Middleware, Request, Response, Result};
use lokalwerk_locale::LocaleRegistry;

use crate::{CookieSessionProbe, PublicPaths, SessionProbe};

/// The outcome of gating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
	/// Pass the request through to the next handler.
	Serve,
	/// Authenticated user on an auth-flow page; send them onwards.
	RedirectAwayFromAuth { location: String },
	/// Protected page without a session; send to login with a callback.
	RedirectToLogin { location: String },
}

/// Middleware that decides, per request, between serving and redirecting.
///
/// The gate is stateless across requests. Each decision follows the same
/// sequence: strip the locale prefix, probe for a session, then check the
/// auth-flow prefix and the public allow list. Redirect targets keep the
/// request's locale; paths without a supported prefix redirect under the
/// default locale.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use lokalwerk_locale::LocaleRegistry;
/// use lokalwerk_middleware::{RoutingDecision, RoutingGate};
///
/// let gate = RoutingGate::new(Arc::new(LocaleRegistry::builtin()));
/// let decision = gate.decide("/de/dashboard", false);
/// assert_eq!(
///     decision,
///     RoutingDecision::RedirectToLogin {
///         location: "/de/auth/login?callbackUrl=%2Fdashboard".to_string(),
///     }
/// );
/// ```
pub struct RoutingGate {
	registry: Arc<LocaleRegistry>,
	session_probe: Arc<dyn SessionProbe>,
	public_paths: PublicPaths,
	auth_path_prefix: String,
	login_path: String,
	post_login_redirect: String,
	callback_param: String,
}

impl RoutingGate {
	/// A gate with default policy: `session_token` cookie probe, public
	/// paths `/` and `/auth/*`, login at `/auth/login`, post-login landing
	/// at `/dashboard`.
	pub fn new(registry: Arc<LocaleRegistry>) -> Self {
		Self::from_settings(registry, &Settings::default())
	}

	/// Build the gate policy from [`Settings`].
	pub fn from_settings(registry: Arc<LocaleRegistry>, settings: &Settings) -> Self {
		Self {
			registry,
			session_probe: Arc::new(CookieSessionProbe::from_settings(settings)),
			public_paths: PublicPaths::from_settings(settings),
			auth_path_prefix: settings.auth_path_prefix.clone(),
			login_path: settings.login_path.clone(),
			post_login_redirect: settings.post_login_redirect.clone(),
			callback_param: settings.callback_param.clone(),
		}
	}

	/// Replace the session probe.
	pub fn with_session_probe(mut self, probe: Arc<dyn SessionProbe>) -> Self {
		self.session_probe = probe;
		self
	}

	/// Replace the public-path allow list.
	pub fn with_public_paths(mut self, public_paths: PublicPaths) -> Self {
		self.public_paths = public_paths;
		self
	}

	/// Decide the gate outcome for a request path and session state.
	///
	/// Pure with respect to the request; all policy lives in the gate.
	pub fn decide(&self, path: &str, has_session: bool) -> RoutingDecision {
		let stripped = self.registry.strip_locale_prefix(path);
		let locale = self.request_locale(path);

		if has_session && stripped.starts_with(&self.auth_path_prefix) {
			return RoutingDecision::RedirectAwayFromAuth {
				location: self
					.registry
					.locale_prefixed(locale, &self.post_login_redirect),
			};
		}

		if self.public_paths.matches(stripped) {
			return RoutingDecision::Serve;
		}

		if !has_session {
			let query: String = url::form_urlencoded::Serializer::new(String::new())
				.append_pair(&self.callback_param, stripped)
				.finish();
			return RoutingDecision::RedirectToLogin {
				location: format!(
					"{}?{}",
					self.registry.locale_prefixed(locale, &self.login_path),
					query
				),
			};
		}

		RoutingDecision::Serve
	}

	/// The locale governing redirect composition: the first path segment
	/// when supported, else the default.
	fn request_locale<'a>(&'a self, path: &str) -> &'a str {
		let first = path
			.strip_prefix('/')
			.and_then(|rest| rest.split('/').next())
			.unwrap_or("");
		self.registry.resolve(Some(first)).code()
	}
}

#[async_trait]
impl Middleware for RoutingGate {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let has_session = self.session_probe.has_session(&request);
		let decision = self.decide(request.path(), has_session);
		debug!(path = request.path(), has_session, ?decision, "routing gate");

		match decision {
			RoutingDecision::Serve => next.handle(request).await,
			RoutingDecision::RedirectAwayFromAuth { location }
			| RoutingDecision::RedirectToLogin { location } => Response::redirect(&location),
		}
	}
}
