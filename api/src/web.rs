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
use crate::types::Response;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::StatusCode;
use serde::Serialize;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Fills `resp` with `body`. An empty body gives a 204 without content type,
/// anything else a 200 of the given content type.
pub fn make_ok_response(resp: &mut Response, body: impl Into<Vec<u8>>, content_type: &str) {
	let body = body.into();
	if body.is_empty() {
		resp.set_status(StatusCode::NO_CONTENT);
		resp.set_body(body);
		return;
	}
	resp.set_status(StatusCode::OK);
	match HeaderValue::from_str(content_type) {
		Ok(value) => resp.set_header(CONTENT_TYPE, value),
		Err(_) => warn!("invalid content type {:?}, not set", content_type),
	}
	resp.set_body(body);
}

/// Utility to serialize a struct into JSON and put it in the response.
pub fn make_json_response<T>(resp: &mut Response, s: &T) -> Result<(), Error>
where
	T: Serialize,
{
	let json = serde_json::to_vec(s)
		.map_err(|e| Error::ResponseError(format!("can't create json response: {}", e)))?;
	make_ok_response(resp, json, JSON_CONTENT_TYPE);
	Ok(())
}

/// Pretty-printed version of `make_json_response`.
pub fn make_json_response_pretty<T>(resp: &mut Response, s: &T) -> Result<(), Error>
where
	T: Serialize,
{
	let json = serde_json::to_vec_pretty(s)
		.map_err(|e| Error::ResponseError(format!("can't create json response: {}", e)))?;
	make_ok_response(resp, json, JSON_CONTENT_TYPE);
	Ok(())
}
