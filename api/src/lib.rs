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

//! Request routing for HTTP services.
//!
//! Two routers live here. The `HandlerStore` maps path prefixes to
//! subsystem handlers and is what the `HttpServer` dispatches with. The
//! typed matcher of the `mapper` module resolves the endpoints of a
//! versioned REST API, binding `<string:name>` and `<int:name>` segments to
//! `Properties`.
//!
//! # Examples
//!
//! ```text
//!	let api = Api::new(1)
//!		.get::<NoPayload, _>("hello", "Say hello", "200", say_hello)
//!		.delete("resource/<string:id>", "Delete resource", "204", delete);
//!
//!	let server = Arc::new(HttpServer::new(""));
//!	RestHandler::register_api(&server, api)?;
//!
//!	let mut apis = ApiServer::new();
//!	apis.start("0.0.0.0:8080".parse()?, server)?;
//! ```

#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]

use pathway_util as util;

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod error;
mod handler_store;
pub mod mapper;
mod properties;
mod rest;
mod rest_handler;
mod server;
mod types;
mod web;

pub use crate::error::{BuildError, Error, PropertyError};
pub use crate::handler_store::HandlerStore;
pub use crate::mapper::{
	Api, CompiledApi, DocSample, EndpointHandler, HandlerFuture, LookupResult, NoPayload, Route,
};
pub use crate::properties::{FromValue, Properties, Value};
pub use crate::rest::ApiServer;
pub use crate::rest_handler::RestHandler;
pub use crate::server::{Handler, HandlerObj, HttpServer, ServerStats, EXCEPTION_REASON};
pub use crate::types::{Request, Response, Verb};
pub use crate::web::{
	make_json_response, make_json_response_pretty, make_ok_response, HTML_CONTENT_TYPE,
	JSON_CONTENT_TYPE,
};
