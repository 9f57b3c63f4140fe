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

//! HTTP transport feeding an `HttpServer`.
//!
//! The listener runs on its own thread with its own tokio runtime, so it can
//! be started from synchronous code. Connections are handled by hyper, keep
//! alive included. Every request is read completely before dispatch.

use crate::error::Error;
use crate::server::HttpServer;
use crate::types::{Request, Response};
use futures::channel::oneshot;
use hyper::ext::ReasonPhrase;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, StatusCode};
use std::convert::{Infallible, TryFrom};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::thread;

/// HTTP server serving the handlers of an `HttpServer`.
#[derive(Default)]
pub struct ApiServer {
	shutdown_sender: Option<oneshot::Sender<()>>,
	thread: Option<thread::JoinHandle<()>>,
	local_addr: Option<SocketAddr>,
}

impl ApiServer {
	/// Creates a new ApiServer, not listening yet.
	pub fn new() -> ApiServer {
		ApiServer::default()
	}

	/// Address the server listens on once started.
	pub fn local_addr(&self) -> Option<SocketAddr> {
		self.local_addr
	}

	pub fn is_running(&self) -> bool {
		self.shutdown_sender.is_some()
	}

	/// Starts the ApiServer at the provided address. Binding happens before
	/// this returns, so an unusable address is reported here.
	pub fn start(&mut self, addr: SocketAddr, server: Arc<HttpServer>) -> Result<SocketAddr, Error> {
		if self.shutdown_sender.is_some() {
			return Err(Error::Internal(
				"Can't start HTTP API server, it's running already".to_string(),
			));
		}
		let listener = TcpListener::bind(addr)
			.map_err(|e| Error::Internal(format!("failed to bind {}: {}", addr, e)))?;
		listener
			.set_nonblocking(true)
			.map_err(|e| Error::Internal(format!("failed to configure listener: {}", e)))?;
		let local_addr = listener
			.local_addr()
			.map_err(|e| Error::Internal(format!("failed to get listener address: {}", e)))?;

		let (tx, rx) = oneshot::channel::<()>();
		let handle = thread::Builder::new()
			.name("apis".to_string())
			.spawn(move || serve(listener, server, rx))
			.map_err(|e| Error::Internal(format!("failed to spawn API server thread: {}", e)))?;

		info!("HTTP API server listening on {}", local_addr);
		self.shutdown_sender = Some(tx);
		self.thread = Some(handle);
		self.local_addr = Some(local_addr);
		Ok(local_addr)
	}

	/// Stops the API server, waiting for in-flight requests to complete.
	/// Returns false if it was not running.
	pub fn stop(&mut self) -> bool {
		match self.shutdown_sender.take() {
			Some(tx) => {
				if tx.send(()).is_err() {
					error!("failed to stop API server, it is already gone");
				}
				if let Some(handle) = self.thread.take() {
					if handle.join().is_err() {
						error!("API server thread panicked");
					}
				}
				info!("HTTP API server stopped");
				true
			}
			None => {
				warn!("HTTP API server was not running");
				false
			}
		}
	}
}

impl Drop for ApiServer {
	fn drop(&mut self) {
		if self.is_running() {
			self.stop();
		}
	}
}

fn serve(listener: TcpListener, server: Arc<HttpServer>, shutdown: oneshot::Receiver<()>) {
	let rt = match tokio::runtime::Builder::new_multi_thread()
		.enable_all()
		.build()
	{
		Ok(rt) => rt,
		Err(e) => {
			error!("failed to create API server runtime: {}", e);
			return;
		}
	};
	rt.block_on(async move {
		let builder = match hyper::Server::from_tcp(listener) {
			Ok(builder) => builder,
			Err(e) => {
				error!("failed to start API server: {}", e);
				return;
			}
		};
		let make_svc = make_service_fn(move |_| {
			let server = server.clone();
			async move {
				Ok::<_, Infallible>(service_fn(move |req| {
					let server = server.clone();
					async move { Ok::<_, Infallible>(handle(server, req).await) }
				}))
			}
		});
		let graceful = builder.serve(make_svc).with_graceful_shutdown(async {
			let _ = shutdown.await;
		});
		if let Err(e) = graceful.await {
			error!("HTTP API server error: {}", e)
		}
	});
}

async fn handle(server: Arc<HttpServer>, req: hyper::Request<Body>) -> hyper::Response<Body> {
	let (parts, body) = req.into_parts();
	let body = match hyper::body::to_bytes(body).await {
		Ok(body) => body,
		Err(e) => {
			warn!("failed to read request body: {}", e);
			return just_response(StatusCode::BAD_REQUEST);
		}
	};
	let target = parts
		.uri
		.path_and_query()
		.map(|pq| pq.as_str())
		.unwrap_or("/")
		.to_owned();
	let request = Request::new(parts.method, target)
		.with_version(parts.version)
		.with_headers(parts.headers)
		.with_body(body.to_vec());

	let response = server.process_request(&request).await;
	into_hyper(response)
}

fn into_hyper(response: Response) -> hyper::Response<Body> {
	let (status, reason, version, headers, body) = response.into_parts();
	let mut resp = hyper::Response::new(Body::from(body));
	*resp.status_mut() = status;
	*resp.version_mut() = version;
	*resp.headers_mut() = headers;
	if let Some(reason) = reason {
		match ReasonPhrase::try_from(reason) {
			Ok(phrase) => {
				resp.extensions_mut().insert(phrase);
			}
			Err(e) => warn!("dropping reason phrase: {:?}", e),
		}
	}
	resp
}

fn just_response(status: StatusCode) -> hyper::Response<Body> {
	let mut resp = hyper::Response::new(Body::empty());
	*resp.status_mut() = status;
	resp
}
