//! HTTP plumbing for the lokalwerk middleware layer.
//!
//! A deliberately small surface: a [`Request`] and [`Response`] over hyper
//! types, the [`Handler`]/[`Middleware`] trait pair, and a
//! [`MiddlewareChain`] that composes middleware around a terminal handler.
//! Anything heavier (routing, bodies beyond bytes, servers) belongs to the
//! embedding application.

mod middleware;
mod request;
mod response;

pub use middleware::{Handler, Middleware, MiddlewareChain};
pub use request::{Request, RequestBuilder};
pub use response::Response;

/// Errors from the HTTP layer.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid URI: {0}")]
	InvalidUri(String),

	#[error("Invalid header value: {0}")]
	InvalidHeader(String),

	#[error("Internal error: {0}")]
	Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
