// Copyright 2021 The Pathway Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Already-parsed HTTP messages as seen by the router and by handlers.

use crate::error::Error;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Method, StatusCode, Version};
use serde::de::DeserializeOwned;
use std::fmt;

/// Verb a handler is registered under.
///
/// `Any` answers every method that has no registration of its own on the
/// same path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verb {
	/// Wildcard
	Any,
	/// A concrete HTTP method
	Exact(Method),
}

impl From<Method> for Verb {
	fn from(method: Method) -> Verb {
		Verb::Exact(method)
	}
}

impl From<&Method> for Verb {
	fn from(method: &Method) -> Verb {
		Verb::Exact(method.clone())
	}
}

impl fmt::Display for Verb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Verb::Any => write!(f, "*"),
			Verb::Exact(m) => write!(f, "{}", m),
		}
	}
}

/// Characters ending the path part of a request target.
pub(crate) const QUERY_DELIMITERS: &[char] = &['?', '#'];

/// An HTTP request whose head and body have been fully read.
#[derive(Debug, Clone)]
pub struct Request {
	method: Method,
	target: String,
	version: Version,
	headers: HeaderMap,
	body: Vec<u8>,
}

impl Request {
	pub fn new(method: Method, target: impl Into<String>) -> Request {
		Request {
			method,
			target: target.into(),
			version: Version::HTTP_11,
			headers: HeaderMap::new(),
			body: vec![],
		}
	}

	pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Request {
		self.body = body.into();
		self
	}

	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Request {
		self.headers.insert(name, value);
		self
	}

	pub fn with_headers(mut self, headers: HeaderMap) -> Request {
		self.headers = headers;
		self
	}

	pub fn with_version(mut self, version: Version) -> Request {
		self.version = version;
		self
	}

	pub fn method(&self) -> &Method {
		&self.method
	}

	/// Request target exactly as received, query and fragment included.
	pub fn target(&self) -> &str {
		&self.target
	}

	/// Target without query string and fragment.
	pub fn path(&self) -> &str {
		match self.target.find(QUERY_DELIMITERS) {
			Some(pos) => &self.target[..pos],
			None => &self.target,
		}
	}

	/// Query string without the leading `?`, if any.
	pub fn query(&self) -> Option<&str> {
		let pos = self.target.find(QUERY_DELIMITERS)?;
		if !self.target[pos..].starts_with('?') {
			return None;
		}
		let rest = &self.target[pos + 1..];
		Some(match rest.find('#') {
			Some(end) => &rest[..end],
			None => rest,
		})
	}

	pub fn version(&self) -> Version {
		self.version
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	pub fn body(&self) -> &[u8] {
		&self.body
	}

	/// Body as text, lossy on invalid UTF-8.
	pub fn body_str(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Decodes the JSON body.
	pub fn parse_json<T: DeserializeOwned>(&self) -> Result<T, Error> {
		serde_json::from_slice(&self.body)
			.map_err(|e| Error::RequestError(format!("Invalid request body: {}", e)))
	}
}

/// The response being assembled for a request.
#[derive(Debug, Clone)]
pub struct Response {
	status: StatusCode,
	reason: Option<String>,
	version: Version,
	headers: HeaderMap,
	body: Vec<u8>,
}

impl Default for Response {
	fn default() -> Response {
		Response {
			status: StatusCode::OK,
			reason: None,
			version: Version::HTTP_11,
			headers: HeaderMap::new(),
			body: vec![],
		}
	}
}

impl Response {
	pub fn new() -> Response {
		Response::default()
	}

	pub fn status(&self) -> StatusCode {
		self.status
	}

	pub fn set_status(&mut self, status: StatusCode) {
		self.status = status;
	}

	/// Custom reason phrase, when one was set.
	pub fn reason(&self) -> Option<&str> {
		self.reason.as_deref()
	}

	pub fn set_reason(&mut self, reason: impl Into<String>) {
		self.reason = Some(reason.into());
	}

	pub fn version(&self) -> Version {
		self.version
	}

	pub fn set_version(&mut self, version: Version) {
		self.version = version;
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
		self.headers.insert(name, value);
	}

	pub fn body(&self) -> &[u8] {
		&self.body
	}

	pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
		self.body = body.into();
	}

	pub(crate) fn into_parts(
		self,
	) -> (StatusCode, Option<String>, Version, HeaderMap, Vec<u8>) {
		(
			self.status,
			self.reason,
			self.version,
			self.headers,
			self.body,
		)
	}
}
