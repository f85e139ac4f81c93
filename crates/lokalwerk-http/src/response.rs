//! HTTP response representation.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use hyper::{HeaderMap, StatusCode, header};

use crate::{Error, Result};

/// An outbound HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// A response with the given status and an empty body.
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// A `200 OK` response.
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// A `404 Not Found` response.
	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	/// A `302 Found` redirect to `location`.
	///
	/// # Examples
	///
	/// ```
	/// use hyper::StatusCode;
	/// use lokalwerk_http::Response;
	///
	/// let response = Response::redirect("/de/auth/login").unwrap();
	/// assert_eq!(response.status, StatusCode::FOUND);
	/// assert_eq!(response.location(), Some("/de/auth/login"));
	/// ```
	pub fn redirect(location: &str) -> Result<Self> {
		Self::with_location(StatusCode::FOUND, location)
	}

	/// A `307 Temporary Redirect` to `location`, preserving the method.
	pub fn temporary_redirect(location: &str) -> Result<Self> {
		Self::with_location(StatusCode::TEMPORARY_REDIRECT, location)
	}

	fn with_location(status: StatusCode, location: &str) -> Result<Self> {
		let value = location
			.parse::<HeaderValue>()
			.map_err(|_| Error::InvalidHeader(location.to_string()))?;
		let mut response = Self::new(status);
		response.headers.insert(header::LOCATION, value);
		Ok(response)
	}

	/// Replace the body.
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Set a header, replacing any previous value.
	pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
		let name = name
			.parse::<HeaderName>()
			.map_err(|_| Error::InvalidHeader(name.to_string()))?;
		let value = value
			.parse::<HeaderValue>()
			.map_err(|_| Error::InvalidHeader(value.to_string()))?;
		self.headers.insert(name, value);
		Ok(self)
	}

	/// The `Location` header, if present and valid UTF-8.
	pub fn location(&self) -> Option<&str> {
		self.headers
			.get(header::LOCATION)
			.and_then(|value| value.to_str().ok())
	}

	/// True for 3xx statuses.
	pub fn is_redirect(&self) -> bool {
		self.status.is_redirection()
	}
}
