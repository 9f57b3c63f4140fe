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

//! Dispatch boundary between the transport and the subsystem handlers.

use crate::error::Error;
use crate::handler_store::HandlerStore;
use crate::mapper::HandlerFuture;
use crate::types::{Request, Response, Verb};
use crate::util::RwLock;
use futures::future::{self, FutureExt};
use hyper::header::{HeaderValue, SERVER};
use hyper::StatusCode;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const DEFAULT_SERVICE_NAME: &str = "pathway";

/// Reason phrase of responses whose handler failed.
pub const EXCEPTION_REASON: &str = "Exception happened";

/// A subsystem mounted on a path of the server. Receives the part of the
/// request target remaining after the matched path.
pub trait Handler: Send + Sync {
	fn call<'a>(
		&'a self,
		tail: &'a str,
		req: &'a Request,
		resp: &'a mut Response,
	) -> HandlerFuture<'a>;
}

impl<F> Handler for F
where
	F: Fn(&str, &Request, &mut Response) -> Result<(), Error> + Send + Sync,
{
	fn call<'a>(
		&'a self,
		tail: &'a str,
		req: &'a Request,
		resp: &'a mut Response,
	) -> HandlerFuture<'a> {
		Box::pin(future::ready(self(tail, req, resp)))
	}
}

pub type HandlerObj = Arc<dyn Handler>;

/// Request counters since the last `take_stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStats {
	pub requests: u64,
	pub unknown_requests: u64,
	pub exceptions: u64,
}

#[derive(Default)]
struct Counters {
	requests: AtomicU64,
	unknown_requests: AtomicU64,
	exceptions: AtomicU64,
}

pub struct HttpServer {
	store: RwLock<HandlerStore<HandlerObj>>,
	counters: Counters,
	server_header: HeaderValue,
}

impl HttpServer {
	pub fn new(base_path: &str) -> HttpServer {
		HttpServer::with_service_name(base_path, DEFAULT_SERVICE_NAME)
	}

	pub fn with_service_name(base_path: &str, service_name: &str) -> HttpServer {
		let header = format!("{}/{}", service_name, env!("CARGO_PKG_VERSION"));
		let server_header = HeaderValue::from_str(&header).unwrap_or_else(|_| {
			warn!("invalid service name {:?}, using default", service_name);
			HeaderValue::from_static(DEFAULT_SERVICE_NAME)
		});
		HttpServer {
			store: RwLock::new(HandlerStore::with_base_path(base_path)),
			counters: Counters::default(),
			server_header,
		}
	}

	pub fn base_path(&self) -> String {
		self.store.read().base_path().to_owned()
	}

	/// Mounts `handler` on `path` for `verb`, replacing any handler already
	/// mounted there.
	pub fn route<H>(&self, verb: impl Into<Verb>, path: &str, handler: H)
	where
		H: Handler + 'static,
	{
		self.route_shared(verb, path, Arc::new(handler));
	}

	pub fn route_shared(&self, verb: impl Into<Verb>, path: &str, handler: HandlerObj) {
		self.store.write().add(verb, path, handler);
	}

	/// Unmounts the handler of `path` for `verb`. Returns whether one was
	/// mounted.
	pub fn unroute(&self, verb: impl Into<Verb>, path: &str) -> bool {
		self.store.write().remove(verb, path).is_some()
	}

	/// Returns the counters and resets them.
	pub fn take_stats(&self) -> ServerStats {
		ServerStats {
			requests: self.counters.requests.swap(0, Ordering::Relaxed),
			unknown_requests: self.counters.unknown_requests.swap(0, Ordering::Relaxed),
			exceptions: self.counters.exceptions.swap(0, Ordering::Relaxed),
		}
	}

	/// Produces the response for `req`, never failing. Unroutable requests
	/// get a 404, failing or panicking handlers a 500.
	pub async fn process_request(&self, req: &Request) -> Response {
		self.counters.requests.fetch_add(1, Ordering::Relaxed);

		let mut resp = Response::new();
		resp.set_version(req.version());
		resp.set_header(SERVER, self.server_header.clone());

		let found = {
			let store = self.store.read();
			store
				.lookup(req.method(), req.target())
				.map(|(tail, handler)| (tail.to_owned(), handler.clone()))
		};
		let (tail, handler) = match found {
			Some(found) => found,
			None => {
				debug!("no handler for {} {}", req.method(), req.target());
				self.counters.unknown_requests.fetch_add(1, Ordering::Relaxed);
				resp.set_status(StatusCode::NOT_FOUND);
				return resp;
			}
		};

		let outcome = AssertUnwindSafe(async { handler.call(&tail, req, &mut resp).await })
			.catch_unwind()
			.await;
		let failed = match outcome {
			Ok(Ok(())) => false,
			Ok(Err(e)) => {
				error!("{} {} failed: {}", req.method(), req.target(), e);
				true
			}
			Err(_) => {
				error!("{} {} panicked", req.method(), req.target());
				true
			}
		};
		if failed {
			self.counters.exceptions.fetch_add(1, Ordering::Relaxed);
			resp.set_status(StatusCode::INTERNAL_SERVER_ERROR);
			resp.set_reason(EXCEPTION_REASON);
			resp.set_body(Vec::new());
		}
		resp
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use futures::executor::block_on;
	use hyper::Method;

	fn echo_tail(tail: &str, _: &Request, resp: &mut Response) -> Result<(), Error> {
		resp.set_body(tail);
		Ok(())
	}

	#[test]
	fn dispatches_to_mounted_handler() {
		let server = HttpServer::new("");
		server.route(Method::GET, "files", echo_tail);

		let resp = block_on(server.process_request(&Request::new(Method::GET, "/files/a/b?x")));
		assert_eq!(resp.status(), StatusCode::OK);
		assert_eq!(resp.body(), b"/a/b?x");
		let server_header = resp.headers().get(SERVER).unwrap().to_str().unwrap();
		assert!(server_header.starts_with("pathway/"));

		let resp = block_on(server.process_request(&Request::new(Method::POST, "/files")));
		assert_eq!(resp.status(), StatusCode::NOT_FOUND);

		assert_eq!(
			server.take_stats(),
			ServerStats {
				requests: 2,
				unknown_requests: 1,
				exceptions: 0,
			}
		);
		assert_eq!(server.take_stats(), ServerStats::default());
	}

	#[test]
	fn failures_become_internal_errors() {
		let server = HttpServer::new("");
		server.route(
			Verb::Any,
			"err",
			|_: &str, _: &Request, resp: &mut Response| -> Result<(), Error> {
				resp.set_body("partial");
				Err(Error::Internal("boom".to_owned()))
			},
		);
		server.route(
			Verb::Any,
			"panic",
			|_: &str, _: &Request, _: &mut Response| -> Result<(), Error> { panic!("handler panic") },
		);

		for target in &["/err", "/panic"] {
			let resp = block_on(server.process_request(&Request::new(Method::GET, *target)));
			assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
			assert_eq!(resp.reason(), Some(EXCEPTION_REASON));
			assert!(resp.body().is_empty());
		}
		assert_eq!(server.take_stats().exceptions, 2);
	}

	#[test]
	fn unroute_removes_handler() {
		let server = HttpServer::new("svc");
		server.route(Method::GET, "a", echo_tail);
		let req = Request::new(Method::GET, "/svc/a");
		assert_eq!(block_on(server.process_request(&req)).status(), StatusCode::OK);

		assert!(server.unroute(Method::GET, "a"));
		assert!(!server.unroute(Method::GET, "a"));
		assert_eq!(
			block_on(server.process_request(&req)).status(),
			StatusCode::NOT_FOUND
		);
	}
}
