//! Handler and middleware traits for request processing.
//!
//! ## Handler
//!
//! The `Handler` trait is the core abstraction for producing a response:
//!
//! ```rust
//! use lokalwerk_http::{Handler, Request, Response};
//! use async_trait::async_trait;
//!
//! struct Hello;
//!
//! #[async_trait]
//! impl Handler for Hello {
//!     async fn handle(&self, _request: Request) -> lokalwerk_http::Result<Response> {
//!         Ok(Response::ok().with_body("Hallo!"))
//!     }
//! }
//! ```
//!
//! ## Middleware
//!
//! Middleware wraps handlers to add cross-cutting behaviour such as locale
//! routing:
//!
//! ```rust
//! use lokalwerk_http::{Handler, Middleware, Request, Response};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct Trace;
//!
//! #[async_trait]
//! impl Middleware for Trace {
//!     async fn process(&self, request: Request, next: Arc<dyn Handler>) -> lokalwerk_http::Result<Response> {
//!         println!("{} {}", request.method, request.uri);
//!         next.handle(request).await
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::{Request, Response, Result};

/// Handler trait for processing requests.
#[async_trait]
pub trait Handler: Send + Sync {
	/// Handles a request and produces a response.
	///
	/// # Errors
	///
	/// Returns an error if the request cannot be processed.
	async fn handle(&self, request: Request) -> Result<Response>;
}

/// Blanket implementation so `Arc<dyn Handler>` is itself a handler.
#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request) -> Result<Response> {
		(**self).handle(request).await
	}
}

/// Middleware trait for request/response processing.
///
/// Middleware can short-circuit by returning a response without calling
/// `next`, or pass the request along and post-process the result.
#[async_trait]
pub trait Middleware: Send + Sync {
	/// Processes a request through this middleware.
	///
	/// # Errors
	///
	/// Returns an error if the middleware or the next handler fails.
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response>;

	/// Whether this middleware should run for the given request.
	///
	/// Returning `false` skips this middleware entirely for the request.
	/// The default runs for every request.
	fn should_continue(&self, _request: &Request) -> bool {
		true
	}
}

/// Composes middleware around a terminal handler.
///
/// Requests flow through middleware in the order they were added.
pub struct MiddlewareChain {
	middlewares: Vec<Arc<dyn Middleware>>,
	handler: Arc<dyn Handler>,
}

impl MiddlewareChain {
	/// Creates a chain with no middleware around `handler`.
	///
	/// # Examples
	///
	/// ```rust
	/// use lokalwerk_http::{MiddlewareChain, Handler, Request, Response};
	/// use std::sync::Arc;
	///
	/// struct App;
	///
	/// #[async_trait::async_trait]
	/// impl Handler for App {
	///     async fn handle(&self, _request: Request) -> lokalwerk_http::Result<Response> {
	///         Ok(Response::ok())
	///     }
	/// }
	///
	/// let chain = MiddlewareChain::new(Arc::new(App));
	/// ```
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self {
			middlewares: Vec::new(),
			handler,
		}
	}

	/// Adds a middleware, builder style.
	pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middlewares.push(middleware);
		self
	}

	/// Adds a middleware in place.
	pub fn add_middleware(&mut self, middleware: Arc<dyn Middleware>) {
		self.middlewares.push(middleware);
	}
}

#[async_trait]
impl Handler for MiddlewareChain {
	async fn handle(&self, request: Request) -> Result<Response> {
		if self.middlewares.is_empty() {
			return self.handler.handle(request).await;
		}

		// Compose in reverse so the first middleware added is the
		// outermost layer. Middleware whose should_continue declines the
		// request are left out of the composed stack.
		let mut current_handler = self.handler.clone();

		let active_middlewares: Vec<_> = self
			.middlewares
			.iter()
			.rev()
			.filter(|mw| mw.should_continue(&request))
			.collect();

		for middleware in active_middlewares {
			current_handler = Arc::new(ComposedHandler {
				middleware: middleware.clone(),
				next: current_handler,
			});
		}

		current_handler.handle(request).await
	}
}

struct ComposedHandler {
	middleware: Arc<dyn Middleware>,
	next: Arc<dyn Handler>,
}

#[async_trait]
impl Handler for ComposedHandler {
	async fn handle(&self, request: Request) -> Result<Response> {
		self.middleware.process(request, self.next.clone()).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use hyper::Method;
	use rstest::rstest;

	struct MockHandler {
		response_body: String,
	}

	#[async_trait]
	impl Handler for MockHandler {
		async fn handle(&self, _request: Request) -> Result<Response> {
			Ok(Response::ok().with_body(self.response_body.clone()))
		}
	}

	struct PrefixMiddleware {
		prefix: String,
	}

	#[async_trait]
	impl Middleware for PrefixMiddleware {
		async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
			let response = next.handle(request).await?;
			let current_body = String::from_utf8(response.body.to_vec()).unwrap_or_default();
			Ok(Response::ok().with_body(format!("{}{}", self.prefix, current_body)))
		}
	}

	fn request_to(path: &str) -> Request {
		Request::builder()
			.method(Method::GET)
			.uri(path)
			.build()
			.unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn empty_chain_delegates_to_handler() {
		let handler = Arc::new(MockHandler {
			response_body: "Test".to_string(),
		});
		let chain = MiddlewareChain::new(handler);

		let response = chain.handle(request_to("/")).await.unwrap();

		let body = String::from_utf8(response.body.to_vec()).unwrap();
		assert_eq!(body, "Test");
	}

	#[rstest]
	#[tokio::test]
	async fn middleware_run_in_insertion_order() {
		let handler = Arc::new(MockHandler {
			response_body: "Data".to_string(),
		});
		let chain = MiddlewareChain::new(handler)
			.with_middleware(Arc::new(PrefixMiddleware {
				prefix: "M1:".to_string(),
			}))
			.with_middleware(Arc::new(PrefixMiddleware {
				prefix: "M2:".to_string(),
			}));

		let response = chain.handle(request_to("/")).await.unwrap();

		let body = String::from_utf8(response.body.to_vec()).unwrap();
		assert_eq!(body, "M1:M2:Data");
	}

	#[rstest]
	#[tokio::test]
	async fn add_middleware_mutates_chain() {
		let handler = Arc::new(MockHandler {
			response_body: "Result".to_string(),
		});
		let mut chain = MiddlewareChain::new(handler);
		chain.add_middleware(Arc::new(PrefixMiddleware {
			prefix: "Prefix:".to_string(),
		}));

		let response = chain.handle(request_to("/")).await.unwrap();

		let body = String::from_utf8(response.body.to_vec()).unwrap();
		assert_eq!(body, "Prefix:Result");
	}

	struct AuthOnlyMiddleware {
		prefix: String,
	}

	#[async_trait]
	impl Middleware for AuthOnlyMiddleware {
		async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
			let response = next.handle(request).await?;
			let current_body = String::from_utf8(response.body.to_vec()).unwrap_or_default();
			Ok(Response::ok().with_body(format!("{}{}", self.prefix, current_body)))
		}

		fn should_continue(&self, request: &Request) -> bool {
			request.uri.path().starts_with("/auth/")
		}
	}

	#[rstest]
	#[tokio::test]
	async fn conditional_middleware_is_skipped() {
		let handler = Arc::new(MockHandler {
			response_body: "Response".to_string(),
		});
		let chain = MiddlewareChain::new(handler).with_middleware(Arc::new(AuthOnlyMiddleware {
			prefix: "Auth:".to_string(),
		}));

		let response = chain.handle(request_to("/auth/login")).await.unwrap();
		let body = String::from_utf8(response.body.to_vec()).unwrap();
		assert_eq!(body, "Auth:Response");

		let response = chain.handle(request_to("/dashboard")).await.unwrap();
		let body = String::from_utf8(response.body.to_vec()).unwrap();
		assert_eq!(body, "Response");
	}

	struct ShortCircuitMiddleware;

	#[async_trait]
	impl Middleware for ShortCircuitMiddleware {
		async fn process(&self, _request: Request, _next: Arc<dyn Handler>) -> Result<Response> {
			Response::redirect("/auth/login")
		}
	}

	#[rstest]
	#[tokio::test]
	async fn middleware_can_short_circuit_with_redirect() {
		let handler = Arc::new(MockHandler {
			response_body: "Handler Response".to_string(),
		});
		let chain = MiddlewareChain::new(handler)
			.with_middleware(Arc::new(ShortCircuitMiddleware))
			.with_middleware(Arc::new(PrefixMiddleware {
				prefix: "Never:".to_string(),
			}));

		let response = chain.handle(request_to("/dashboard")).await.unwrap();

		assert_eq!(response.status, hyper::StatusCode::FOUND);
		assert_eq!(response.location(), Some("/auth/login"));
	}
}
