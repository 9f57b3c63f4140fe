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

use crate::error::Error;
use crate::properties::Properties;
use crate::types::{Request, Response};
use futures::future::{self, BoxFuture};
use hyper::Method;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub type HandlerFuture<'a> = BoxFuture<'a, Result<(), Error>>;

/// Handler of a single REST endpoint.
///
/// Plain functions and closures with the signature
/// `Fn(&Request, &mut Response, &Properties) -> Result<(), Error>` are
/// handlers already; implement the trait directly for handlers that need to
/// await something.
pub trait EndpointHandler: Send + Sync {
	fn call<'a>(
		&'a self,
		req: &'a Request,
		resp: &'a mut Response,
		properties: &'a Properties,
	) -> HandlerFuture<'a>;
}

impl<F> EndpointHandler for F
where
	F: Fn(&Request, &mut Response, &Properties) -> Result<(), Error> + Send + Sync,
{
	fn call<'a>(
		&'a self,
		req: &'a Request,
		resp: &'a mut Response,
		properties: &'a Properties,
	) -> HandlerFuture<'a> {
		Box::pin(future::ready(self(req, resp, properties)))
	}
}

/// Payload types able to produce an example of themselves for the API
/// introspection page.
pub trait DocSample: Serialize {
	fn doc_sample() -> Self;
}

/// Stand-in for endpoints without a request or response payload.
#[derive(Serialize, Debug, Clone, Copy, Default)]
pub struct NoPayload;

impl DocSample for NoPayload {
	fn doc_sample() -> NoPayload {
		NoPayload
	}
}

fn example<T: DocSample>() -> Value {
	serde_json::to_value(T::doc_sample()).unwrap_or(Value::Null)
}

/// Route
///
/// Contains Http Method, URI template, documentation and the corresponding
/// handler.
#[derive(Clone)]
pub struct Route {
	method: Method,
	uri: String,
	description: String,
	input_example: Value,
	output_example: Value,
	response_status: String,
	handler: Arc<dyn EndpointHandler>,
}

impl Route {
	pub fn new<H>(
		method: Method,
		uri: &str,
		description: &str,
		response_status: &str,
		handler: H,
	) -> Route
	where
		H: EndpointHandler + 'static,
	{
		Route {
			method,
			uri: uri.to_owned(),
			description: description.to_owned(),
			input_example: Value::Null,
			output_example: Value::Null,
			response_status: response_status.to_owned(),
			handler: Arc::new(handler),
		}
	}

	/// Documents the request and response payloads with their samples.
	pub fn with_examples<I: DocSample, O: DocSample>(mut self) -> Route {
		self.input_example = example::<I>();
		self.output_example = example::<O>();
		self
	}

	pub fn get<O, H>(uri: &str, description: &str, response_status: &str, handler: H) -> Route
	where
		O: DocSample,
		H: EndpointHandler + 'static,
	{
		Route::new(Method::GET, uri, description, response_status, handler)
			.with_examples::<NoPayload, O>()
	}

	pub fn post<I, O, H>(uri: &str, description: &str, response_status: &str, handler: H) -> Route
	where
		I: DocSample,
		O: DocSample,
		H: EndpointHandler + 'static,
	{
		Route::new(Method::POST, uri, description, response_status, handler)
			.with_examples::<I, O>()
	}

	pub fn put<I, H>(uri: &str, description: &str, response_status: &str, handler: H) -> Route
	where
		I: DocSample,
		H: EndpointHandler + 'static,
	{
		Route::new(Method::PUT, uri, description, response_status, handler)
			.with_examples::<I, NoPayload>()
	}

	pub fn delete<H>(uri: &str, description: &str, response_status: &str, handler: H) -> Route
	where
		H: EndpointHandler + 'static,
	{
		Route::new(Method::DELETE, uri, description, response_status, handler)
	}

	/// Returns the reference to http method.
	#[inline]
	pub fn method(&self) -> &Method {
		&self.method
	}

	/// Returns the declared URI template.
	#[inline]
	pub fn uri(&self) -> &str {
		&self.uri
	}

	#[inline]
	pub fn description(&self) -> &str {
		&self.description
	}

	#[inline]
	pub fn input_example(&self) -> &Value {
		&self.input_example
	}

	#[inline]
	pub fn output_example(&self) -> &Value {
		&self.output_example
	}

	#[inline]
	pub fn response_status(&self) -> &str {
		&self.response_status
	}

	/// Returns the reference to the handler.
	#[inline]
	pub fn handler(&self) -> &dyn EndpointHandler {
		&*self.handler
	}
}

impl fmt::Debug for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("method", &self.method)
			.field("uri", &self.uri)
			.field("description", &self.description)
			.field("response_status", &self.response_status)
			.field("handler", &"<handler>")
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use futures::executor::block_on;
	use hyper::StatusCode;

	fn noop(_: &Request, _: &mut Response, _: &Properties) -> Result<(), Error> {
		Ok(())
	}

	#[derive(Serialize)]
	struct Echo {
		echo: String,
	}

	impl DocSample for Echo {
		fn doc_sample() -> Echo {
			Echo {
				echo: "hello world".to_owned(),
			}
		}
	}

	#[test]
	fn examples_come_from_doc_samples() {
		let route = Route::post::<Echo, Echo, _>(
			"resource",
			"Add new resource",
			"200 - added",
			noop,
		);
		assert_eq!(route.method(), &Method::POST);
		assert_eq!(route.input_example()["echo"], "hello world");
		assert_eq!(route.output_example()["echo"], "hello world");

		let route = Route::delete(
			"resource/<string:id>",
			"Delete resource",
			"204 - deleted",
			noop,
		);
		assert!(route.input_example().is_null());
		assert!(route.output_example().is_null());
	}

	#[test]
	fn closures_are_handlers() {
		let route = Route::new(
			Method::GET,
			"hello",
			"Say Hello",
			"200",
			|_: &Request, resp: &mut Response, _: &Properties| -> Result<(), Error> {
				resp.set_status(StatusCode::ACCEPTED);
				Ok(())
			},
		);
		let req = Request::new(Method::GET, "/hello");
		let mut resp = Response::new();
		let props = Properties::new();
		block_on(route.handler().call(&req, &mut resp, &props)).unwrap();
		assert_eq!(resp.status(), StatusCode::ACCEPTED);
	}
}
