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

//! The demo REST service: a set of named resources.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hyper::{Method, StatusCode};

use crate::api::{
	make_json_response, make_ok_response, Api, DocSample, Error, HttpServer, Properties, Request,
	Response, RestHandler,
};
use crate::util::RwLock;

#[derive(Serialize, Deserialize, Debug)]
pub struct ResourceAddRequest {
	pub name: String,
}

impl DocSample for ResourceAddRequest {
	fn doc_sample() -> ResourceAddRequest {
		ResourceAddRequest {
			name: "world".to_owned(),
		}
	}
}

#[derive(Serialize, Deserialize, Debug)]
pub struct EchoResponse {
	pub echo: String,
}

impl DocSample for EchoResponse {
	fn doc_sample() -> EchoResponse {
		EchoResponse {
			echo: "hello world".to_owned(),
		}
	}
}

#[derive(Default)]
pub struct ResourceService {
	resources: RwLock<BTreeSet<String>>,
}

impl ResourceService {
	pub fn new() -> ResourceService {
		ResourceService::default()
	}

	/// Mounts the shutdown endpoint and version 1 of the resource API.
	/// `running` is cleared when a shutdown is requested.
	pub fn register(self, server: &HttpServer, running: Arc<AtomicBool>) -> Result<(), Error> {
		server.route(
			Method::POST,
			"shutdown",
			move |_: &str, _: &Request, resp: &mut Response| -> Result<(), Error> {
				warn!("shutdown requested");
				running.store(false, Ordering::SeqCst);
				make_ok_response(resp, "", "");
				Ok(())
			},
		);

		let service = Arc::new(self);
		let (add, delete, get) = (service.clone(), service.clone(), service);
		let api = Api::new(1)
			.post::<ResourceAddRequest, EchoResponse, _>(
				"resource",
				"Add new resource",
				"200 - added<br>409 - resource exists",
				move |req: &Request, resp: &mut Response, _: &Properties| add.add(req, resp),
			)
			.delete(
				"resource/<string:id>",
				"Delete resource",
				"204 - deleted<br>404 - resource not found",
				move |_: &Request, resp: &mut Response, p: &Properties| delete.delete(resp, p),
			)
			.get::<EchoResponse, _>(
				"resource/<string:id>",
				"Resource info",
				"200 - ok<br>404 - resource not found",
				move |_: &Request, resp: &mut Response, p: &Properties| get.get(resp, p),
			)
			.get::<EchoResponse, _>(
				"hello",
				"Say Hello",
				"200 - Hello back",
				|_: &Request, resp: &mut Response, _: &Properties| -> Result<(), Error> {
					make_json_response(
						resp,
						&EchoResponse {
							echo: "world".to_owned(),
						},
					)
				},
			);
		RestHandler::register_api(server, api)
	}

	fn add(&self, req: &Request, resp: &mut Response) -> Result<(), Error> {
		let add: ResourceAddRequest = match req.parse_json() {
			Ok(add) => add,
			Err(e) => {
				debug!("rejected resource: {}", e);
				resp.set_status(StatusCode::BAD_REQUEST);
				return Ok(());
			}
		};
		if !self.resources.write().insert(add.name.clone()) {
			resp.set_status(StatusCode::CONFLICT);
			return Ok(());
		}
		make_json_response(
			resp,
			&EchoResponse {
				echo: format!("hello {}", add.name),
			},
		)
	}

	fn delete(&self, resp: &mut Response, props: &Properties) -> Result<(), Error> {
		let id = resource_id(props)?;
		if self.resources.write().remove(&id) {
			make_ok_response(resp, "", "");
		} else {
			resp.set_status(StatusCode::NOT_FOUND);
		}
		Ok(())
	}

	fn get(&self, resp: &mut Response, props: &Properties) -> Result<(), Error> {
		let id = resource_id(props)?;
		if !self.resources.read().contains(&id) {
			resp.set_status(StatusCode::NOT_FOUND);
			return Ok(());
		}
		make_json_response(
			resp,
			&EchoResponse {
				echo: format!("It's {}", id),
			},
		)
	}
}

fn resource_id(props: &Properties) -> Result<String, Error> {
	props
		.value::<String>("id")?
		.ok_or_else(|| Error::Argument("resource id missing".to_owned()))
}
