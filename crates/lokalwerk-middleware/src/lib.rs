//! Locale-aware request middleware.
//!
//! Two middleware cover the inbound pipeline:
//!
//! - [`LocaleRedirectMiddleware`] rewrites paths that lack a supported
//!   locale prefix, resolving the target locale from the preference cookie,
//!   `Accept-Language`, or the default.
//! - [`RoutingGate`] gates prefixed requests by session presence, serving
//!   public paths and redirecting everything else to the login page with a
//!   callback, or bouncing signed-in users off the auth-flow pages.
//!
//! Both compose through [`lokalwerk_http::MiddlewareChain`], the redirect
//! middleware first:
//!
//! ```
//! use std::sync::Arc;
//! use lokalwerk_http::MiddlewareChain;
//! use lokalwerk_locale::LocaleRegistry;
//! use lokalwerk_middleware::{LocaleRedirectMiddleware, RoutingGate};
//! # use lokalwerk_http::{Handler, Request, Response};
//! # struct App;
//! # #[async_trait::async_trait]
//! # impl Handler for App {
//! #     async fn handle(&self, _request: Request) -> lokalwerk_http::Result<Response> {
//! #         Ok(Response::ok())
//! #     }
//! # }
//!
//! let registry = Arc::new(LocaleRegistry::builtin());
//! let chain = MiddlewareChain::new(Arc::new(App))
//!     .with_middleware(Arc::new(LocaleRedirectMiddleware::new(registry.clone())))
//!     .with_middleware(Arc::new(RoutingGate::new(registry)));
//! ```

mod gate;
mod locale_redirect;
mod public_paths;
mod session;

pub use gate::{RoutingDecision, RoutingGate};
pub use locale_redirect::LocaleRedirectMiddleware;
pub use public_paths::PublicPaths;
pub use session::{CookieSessionProbe, SessionProbe};
