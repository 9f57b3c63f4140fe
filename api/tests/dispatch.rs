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

use pathway_api as api;

use crate::api::*;
use futures::executor::block_on;
use hyper::{Method, StatusCode};
use pretty_assertions::assert_eq;

fn tagged(tag: &'static str) -> impl Fn(&str, &Request, &mut Response) -> Result<(), Error> {
	move |tail: &str, _: &Request, resp: &mut Response| {
		make_ok_response(resp, format!("{}:{}", tag, tail), "text/plain");
		Ok(())
	}
}

fn store() -> HandlerStore<&'static str> {
	let mut store = HandlerStore::new();
	store.add(Method::GET, "a/b", "get a/b");
	store.add(Verb::Any, "a", "any a");
	store.add(Method::POST, "a", "post a");
	store.add_any("", "root");
	store
}

#[test]
fn longest_registered_prefix_wins() {
	let store = store();
	assert_eq!(store.lookup(&Method::GET, "/a/b/c"), Some(("/c", &"get a/b")));
	assert_eq!(store.lookup(&Method::PUT, "/a/b/c"), Some(("/b/c", &"any a")));
	assert_eq!(store.lookup(&Method::POST, "/a"), Some(("", &"post a")));
	assert_eq!(store.lookup(&Method::GET, "/a?x=1"), Some(("?x=1", &"any a")));
	assert_eq!(store.lookup(&Method::GET, "/zzz"), Some(("/zzz", &"root")));
}

#[test]
fn removal_restores_shorter_prefixes() {
	let mut store = store();
	assert_eq!(store.remove(Method::GET, "a/b"), Some("get a/b"));
	assert_eq!(store.lookup(&Method::GET, "/a/b/c"), Some(("/b/c", &"any a")));
	assert_eq!(store.remove_any("a"), Some("any a"));
	assert_eq!(store.lookup(&Method::GET, "/a/b"), Some(("/a/b", &"root")));
	assert_eq!(store.lookup(&Method::POST, "/a/b"), Some(("/b", &"post a")));
}

#[test]
fn server_dispatches_by_prefix() {
	let server = HttpServer::new("/svc/");
	server.route(Verb::Any, "files", tagged("files"));
	server.route(Method::GET, "files/private", tagged("private"));

	let cases = vec![
		(Method::GET, "/svc/files/x.txt", StatusCode::OK, "files:/x.txt"),
		(Method::GET, "/svc/files/private/k", StatusCode::OK, "private:/k"),
		(Method::PUT, "/svc/files/private/k", StatusCode::OK, "files:/private/k"),
		(Method::GET, "/svc/other", StatusCode::NOT_FOUND, ""),
		(Method::GET, "/svcfiles/x", StatusCode::NOT_FOUND, ""),
		(Method::GET, "/files/x", StatusCode::NOT_FOUND, ""),
	];
	for (method, target, status, body) in cases {
		let resp = block_on(server.process_request(&Request::new(method, target)));
		assert_eq!(resp.status(), status, "{}", target);
		assert_eq!(String::from_utf8_lossy(resp.body()), body, "{}", target);
	}
	assert_eq!(
		server.take_stats(),
		ServerStats {
			requests: 6,
			unknown_requests: 3,
			exceptions: 0,
		}
	);
}
