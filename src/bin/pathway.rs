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

//! Main for building the pathway demo service.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

use pathway_api as api;
use pathway_config as config;
use pathway_util as util;

mod cmd;

use clap::{App, Arg};
use std::process::exit;

fn main() {
	let exit_code = real_main();
	exit(exit_code);
}

fn real_main() -> i32 {
	let args = App::new("pathway")
		.version(crate_version!())
		.author("The Pathway Team")
		.about("Demo REST service on top of the pathway router.")
		.arg(
			Arg::with_name("config")
				.short("c")
				.long("config")
				.value_name("FILE")
				.help("Sets a custom configuration file")
				.takes_value(true),
		)
		.arg(
			Arg::with_name("port")
				.short("p")
				.long("port")
				.help("Port to start the server on")
				.takes_value(true),
		)
		.arg(
			Arg::with_name("address")
				.short("a")
				.long("address")
				.help("Address to bind the server to")
				.takes_value(true),
		)
		.get_matches();

	let global_config = match config::initial_setup(args.value_of("config")) {
		Ok(c) => c,
		Err(e) => {
			eprintln!("Error loading pathway configuration: {}", e);
			return 1;
		}
	};

	let mut server_config = global_config.server();
	if let Some(port) = args.value_of("port") {
		match port.parse() {
			Ok(port) => server_config.bind_port = port,
			Err(_) => {
				eprintln!("Invalid port {:?}", port);
				return 1;
			}
		}
	}
	if let Some(address) = args.value_of("address") {
		server_config.bind_address = address.to_owned();
	}

	util::init_logger(global_config.logging());
	if let Some(file_path) = &global_config.config_file_path {
		info!("Using configuration file at {}", file_path.display());
	}

	match cmd::server::start_server(&server_config) {
		Ok(()) => 0,
		Err(e) => {
			error!("Failed to start service: {}", e);
			1
		}
	}
}
