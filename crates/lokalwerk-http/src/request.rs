//! HTTP request representation.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Method, Uri, Version, header};

use crate::{Error, Result};

/// An inbound HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Request {
	/// Start building a request.
	///
	/// # Examples
	///
	/// ```
	/// use hyper::Method;
	/// use lokalwerk_http::Request;
	///
	/// let request = Request::builder()
	///     .method(Method::GET)
	///     .uri("/de/dashboard?tab=2")
	///     .build()
	///     .unwrap();
	/// assert_eq!(request.path(), "/de/dashboard");
	/// assert_eq!(request.query(), Some("tab=2"));
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}

	/// The URI path.
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// The raw query string, if any.
	pub fn query(&self) -> Option<&str> {
		self.uri.query()
	}

	/// A header value as a string, if present and valid UTF-8.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}

	/// The value of a cookie from the `Cookie` header, if present.
	///
	/// # Examples
	///
	/// ```
	/// use lokalwerk_http::Request;
	///
	/// let request = Request::builder()
	///     .uri("/")
	///     .header("cookie", "a=1; session_token=abc")
	///     .build()
	///     .unwrap();
	/// assert_eq!(request.cookie("session_token"), Some("abc".to_string()));
	/// assert_eq!(request.cookie("missing"), None);
	/// ```
	pub fn cookie(&self, name: &str) -> Option<String> {
		let cookie_header = self.headers.get(header::COOKIE)?.to_str().ok()?;
		for cookie in cookie_header.split(';') {
			let parts: Vec<&str> = cookie.trim().splitn(2, '=').collect();
			if parts.len() == 2 && parts[0] == name {
				return Some(parts[1].to_string());
			}
		}
		None
	}
}

/// Builder for [`Request`].
#[derive(Debug, Default)]
pub struct RequestBuilder {
	method: Option<Method>,
	uri: Option<String>,
	version: Option<Version>,
	headers: HeaderMap,
	header_errors: Vec<String>,
	body: Bytes,
}

impl RequestBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = Some(uri.into());
		self
	}

	pub fn version(mut self, version: Version) -> Self {
		self.version = Some(version);
		self
	}

	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	/// Append a header from string parts.
	pub fn header(mut self, name: &str, value: &str) -> Self {
		let name = match name.parse::<HeaderName>() {
			Ok(name) => name,
			Err(_) => {
				self.header_errors.push(name.to_string());
				return self;
			}
		};
		match value.parse::<HeaderValue>() {
			Ok(value) => {
				self.headers.append(name, value);
			}
			Err(_) => self.header_errors.push(name.to_string()),
		}
		self
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Finish the request. Defaults: `GET`, HTTP/1.1, empty body.
	///
	/// # Errors
	///
	/// Fails when the URI is missing or unparseable, or a header part was
	/// invalid.
	pub fn build(self) -> Result<Request> {
		if let Some(name) = self.header_errors.into_iter().next() {
			return Err(Error::InvalidHeader(name));
		}
		let raw_uri = self
			.uri
			.ok_or_else(|| Error::InvalidUri("missing URI".to_string()))?;
		let uri = raw_uri
			.parse::<Uri>()
			.map_err(|_| Error::InvalidUri(raw_uri))?;
		Ok(Request {
			method: self.method.unwrap_or(Method::GET),
			uri,
			version: self.version.unwrap_or(Version::HTTP_11),
			headers: self.headers,
			body: self.body,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn defaults_apply() {
		let request = Request::builder().uri("/").build().unwrap();
		assert_eq!(request.method, Method::GET);
		assert_eq!(request.version, Version::HTTP_11);
		assert!(request.body.is_empty());
	}

	#[test]
	fn missing_uri_is_an_error() {
		assert!(matches!(
			Request::builder().build(),
			Err(Error::InvalidUri(_))
		));
	}

	#[test]
	fn unparseable_uri_is_an_error() {
		assert!(matches!(
			Request::builder().uri("http://[broken").build(),
			Err(Error::InvalidUri(_))
		));
	}

	#[test]
	fn invalid_header_value_is_an_error() {
		let result = Request::builder().uri("/").header("x-test", "bad\nvalue").build();
		assert!(matches!(result, Err(Error::InvalidHeader(_))));
	}

	#[rstest]
	#[case("session_token=abc", "session_token", Some("abc"))]
	#[case("a=1; session_token=abc; b=2", "session_token", Some("abc"))]
	#[case("a=1", "session_token", None)]
	#[case("session_token=", "session_token", Some(""))]
	#[case("token=v=1", "token", Some("v=1"))]
	fn cookie_parsing(
		#[case] header: &str,
		#[case] name: &str,
		#[case] expected: Option<&str>,
	) {
		let request = Request::builder()
			.uri("/")
			.header("cookie", header)
			.build()
			.unwrap();
		assert_eq!(request.cookie(name), expected.map(str::to_string));
	}

	#[test]
	fn no_cookie_header_means_no_cookie() {
		let request = Request::builder().uri("/").build().unwrap();
		assert_eq!(request.cookie("any"), None);
	}
}
