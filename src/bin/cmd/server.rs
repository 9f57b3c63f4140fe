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

use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::api::{self, ApiServer, HttpServer};
use crate::config::ServerConfig;
use crate::cmd::service::ResourceService;

/// Runs the service until Ctrl+C, SIGTERM or a shutdown request.
pub fn start_server(config: &ServerConfig) -> Result<(), api::Error> {
	let addr = resolve(&config.listen_addr())?;
	let server = Arc::new(HttpServer::with_service_name(
		&config.base_path,
		&config.service_name,
	));

	let running = Arc::new(AtomicBool::new(true));
	ResourceService::new().register(&server, running.clone())?;

	let r = running.clone();
	if let Err(e) = ctrlc::set_handler(move || {
		r.store(false, Ordering::SeqCst);
	}) {
		warn!(
			"Error setting handler for both SIGINT (Ctrl+C) and SIGTERM (kill): {}",
			e
		);
	}

	let mut apis = ApiServer::new();
	let local_addr = apis.start(addr, server.clone())?;
	warn!("Service listening on {}", local_addr);

	while running.load(Ordering::SeqCst) {
		thread::sleep(Duration::from_millis(200));
	}
	warn!("Shutting down...");
	apis.stop();
	let stats = server.take_stats();
	info!(
		"served {} requests, {} unknown, {} failed",
		stats.requests, stats.unknown_requests, stats.exceptions
	);
	warn!("Shutdown complete.");
	Ok(())
}

fn resolve(addr: &str) -> Result<SocketAddr, api::Error> {
	addr.to_socket_addrs()
		.map_err(|e| api::Error::Argument(format!("invalid listen address {}: {}", addr, e)))?
		.next()
		.ok_or_else(|| api::Error::Argument(format!("{} resolves to nothing", addr)))
}
