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

//! Versioned REST APIs mounted on an `HttpServer`.

use crate::error::Error;
use crate::mapper::{Api, CompiledApi, HandlerFuture};
use crate::server::{Handler, HttpServer};
use crate::types::{Request, Response, Verb, QUERY_DELIMITERS};
use crate::util::html_escape;
use crate::web::{make_ok_response, HTML_CONTENT_TYPE};
use hyper::StatusCode;
use serde_json::Value;

const INTROSPECTION_HEAD: &str = r#"  <style type="text/css">
body { width:100%; padding:0; margin:0; }
.methods { border: 1px solid black; border-collapse: collapse; width:100%; }
.methods th, .methods td { padding: 0.5em; }
td.code { font-family: monospace; max-width: 60em; padding: 0; }
.code > pre { overflow-x:auto; text-overflow: ellipsis; padding: 0.5em; margin:0; }
  </style>
"#;

const INTROSPECTION_TABLE_HEADER: &str = r#"<table border="1" class="methods">
  <tr><th>URI</th>
      <th>Method</th>
      <th>Description</th>
      <th width="35%">Input</th>
      <th width="35%">Output</th>
      <th>Status codes</th>
  </tr>
"#;

/// Serves one compiled API version below `api/v<version>`.
pub struct RestHandler {
	api: CompiledApi,
}

impl RestHandler {
	pub fn new(api: CompiledApi) -> RestHandler {
		RestHandler { api }
	}

	/// Path an API version is mounted on.
	pub fn mount_path(version: u32) -> String {
		format!("api/v{}", version)
	}

	/// Compiles `api` and mounts it on `server` for every verb. A malformed
	/// route declaration fails the whole registration and nothing is mounted.
	pub fn register_api(server: &HttpServer, api: Api) -> Result<(), Error> {
		let api = api.build()?;
		let path = RestHandler::mount_path(api.version());
		info!("registering API v{} on /{}", api.version(), path);
		server.route(Verb::Any, &path, RestHandler::new(api));
		Ok(())
	}

	pub fn api(&self) -> &CompiledApi {
		&self.api
	}

	/// HTML page listing every route of the API with its documentation.
	pub fn introspection_page(&self) -> String {
		let version = self.api.version();
		let mut page = format!(
			"<!DOCTYPE html>\n<html>\n<head>\n  <title>Pathway API version {}</title>\n{}</head>\n<body>\n<h2>Pathway API version {}</h2>\n{}",
			version, INTROSPECTION_HEAD, version, INTROSPECTION_TABLE_HEADER
		);
		for route in self.api.routes() {
			page.push_str(&format!(
				"<tr><td>/api/v{}/{}</td><td>{}</td><td>{}</td><td class=\"code\"><pre>{}</pre></td><td class=\"code\"><pre>{}</pre></td><td>{}</td></tr>\n",
				version,
				html_escape(route.uri()),
				route.method(),
				html_escape(route.description()),
				html_escape(&pretty(route.input_example())),
				html_escape(&pretty(route.output_example())),
				html_escape(route.response_status()),
			));
		}
		page.push_str("</table>\n</body>\n</html>");
		page
	}

	async fn handle(&self, tail: &str, req: &Request, resp: &mut Response) {
		debug!("got request: {} {}", req.method(), req.target());
		if is_api_root(tail) {
			make_ok_response(resp, self.introspection_page(), HTML_CONTENT_TYPE);
			return;
		}
		let found = match self.api.lookup(req.method(), tail) {
			Some(found) => found,
			None => {
				error!(
					"failed to lookup API v{} handler for {} {}",
					self.api.version(),
					req.method(),
					tail
				);
				resp.set_status(StatusCode::NOT_FOUND);
				return;
			}
		};
		let handler = found.route.handler();
		if let Err(e) = handler.call(req, resp, &found.properties).await {
			error!(
				"unexpected error on {} {}: {}",
				req.method(),
				req.target(),
				e
			);
			resp.set_status(StatusCode::INTERNAL_SERVER_ERROR);
		}
	}
}

impl Handler for RestHandler {
	fn call<'a>(
		&'a self,
		tail: &'a str,
		req: &'a Request,
		resp: &'a mut Response,
	) -> HandlerFuture<'a> {
		Box::pin(async move {
			self.handle(tail, req, resp).await;
			Ok(())
		})
	}
}

fn is_api_root(tail: &str) -> bool {
	tail.split(QUERY_DELIMITERS)
		.next()
		.map_or(true, |path| path.trim_matches('/').is_empty())
}

fn pretty(example: &Value) -> String {
	serde_json::to_string_pretty(example).unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mapper::{DocSample, NoPayload, Route};
	use crate::properties::Properties;
	use crate::web::make_json_response;
	use futures::executor::block_on;
	use hyper::header::CONTENT_TYPE;
	use hyper::Method;

	#[derive(Serialize)]
	struct Item {
		id: String,
	}

	impl DocSample for Item {
		fn doc_sample() -> Item {
			Item {
				id: "<id>".to_owned(),
			}
		}
	}

	fn get_item(_: &Request, resp: &mut Response, props: &Properties) -> Result<(), Error> {
		let id = props.value_or("id", String::new())?;
		make_json_response(resp, &Item { id })
	}

	fn failing(_: &Request, _: &mut Response, _: &Properties) -> Result<(), Error> {
		Err(Error::Internal("storage is gone".to_owned()))
	}

	fn server() -> HttpServer {
		let server = HttpServer::new("");
		let api = Api::new(2)
			.get::<Item, _>("item/<string:id>", "Get item", "200 - found", get_item)
			.post::<Item, NoPayload, _>("item", "Add item", "204 - added", failing);
		RestHandler::register_api(&server, api).unwrap();
		server
	}

	#[test]
	fn endpoint_gets_bound_properties() {
		let server = server();
		let resp = block_on(server.process_request(&Request::new(Method::GET, "/api/v2/item/a1")));
		assert_eq!(resp.status(), StatusCode::OK);
		assert_eq!(resp.body(), br#"{"id":"a1"}"#);
	}

	#[test]
	fn unknown_endpoint_is_not_found() {
		let server = server();
		for target in &["/api/v2/item", "/api/v2/nothing", "/api/v2/item/a/b"] {
			let resp = block_on(server.process_request(&Request::new(Method::GET, *target)));
			assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", target);
		}
		let resp = block_on(server.process_request(&Request::new(Method::GET, "/api/v1/item/a")));
		assert_eq!(resp.status(), StatusCode::NOT_FOUND);
		assert_eq!(server.take_stats().unknown_requests, 1);
	}

	#[test]
	fn endpoint_error_is_internal_error() {
		let server = server();
		let resp = block_on(server.process_request(&Request::new(Method::POST, "/api/v2/item")));
		assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[test]
	fn api_root_shows_introspection() {
		let server = server();
		for target in &["/api/v2", "/api/v2/", "/api/v2?x=1"] {
			let resp = block_on(server.process_request(&Request::new(Method::GET, *target)));
			assert_eq!(resp.status(), StatusCode::OK);
			assert_eq!(resp.headers()[CONTENT_TYPE], HTML_CONTENT_TYPE);
			let page = String::from_utf8(resp.body().to_vec()).unwrap();
			assert!(page.contains("<title>Pathway API version 2</title>"));
			assert!(page.contains("/api/v2/item/&lt;string:id&gt;"));
			assert!(page.contains("&quot;id&quot;: &quot;&lt;id&gt;&quot;"));
			assert!(page.contains("<td>POST</td><td>Add item</td>"));
			assert_eq!(page.matches("<tr><td>/api/v2/").count(), 2);
			assert!(page.ends_with("</table>\n</body>\n</html>"));
		}
	}

	#[test]
	fn malformed_api_is_not_mounted() {
		let server = HttpServer::new("");
		let api = Api::new(1).route(Route::get::<NoPayload, _>("bad/<float:x>", "", "", get_item));
		assert!(RestHandler::register_api(&server, api).is_err());
		let resp = block_on(server.process_request(&Request::new(Method::GET, "/api/v1")));
		assert_eq!(resp.status(), StatusCode::NOT_FOUND);
	}
}
