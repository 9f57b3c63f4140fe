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

//! Public types for config modules

use std::io;
use std::path::PathBuf;

use crate::util::LoggingConfig;

/// Error type wrapping config errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// Error with parsing of config file
	#[error("Error parsing configuration file at {0} - {1}")]
	ParseError(String, String),

	/// Error with fileIO while reading config file
	#[error("{1} {0}")]
	FileIOError(String, String),

	/// No file found
	#[error("Configuration file not found: {0}")]
	FileNotFoundError(String),

	/// Error serializing config values
	#[error("Error serializing configuration: {0}")]
	SerializationError(String),
}

impl From<io::Error> for ConfigError {
	fn from(error: io::Error) -> ConfigError {
		ConfigError::FileIOError(
			String::from(""),
			format!("Error loading config file: {}", error),
		)
	}
}

/// Settings of the HTTP service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
	/// Address the HTTP listener binds to
	#[serde(default = "default_bind_address")]
	pub bind_address: String,
	/// Port the HTTP listener binds to
	#[serde(default = "default_bind_port")]
	pub bind_port: u16,
	/// Path prefix every served target must start with
	#[serde(default)]
	pub base_path: String,
	/// Name sent in the Server header
	#[serde(default = "default_service_name")]
	pub service_name: String,
}

impl Default for ServerConfig {
	fn default() -> ServerConfig {
		ServerConfig {
			bind_address: default_bind_address(),
			bind_port: default_bind_port(),
			base_path: String::new(),
			service_name: default_service_name(),
		}
	}
}

impl ServerConfig {
	/// The listen address as "address:port".
	pub fn listen_addr(&self) -> String {
		format!("{}:{}", self.bind_address, self.bind_port)
	}
}

fn default_bind_address() -> String {
	"0.0.0.0".to_owned()
}

fn default_bind_port() -> u16 {
	8080
}

fn default_service_name() -> String {
	"pathway".to_owned()
}

/// Going to hold all of the various configuration types
/// separately, to flatten out the configuration file into
/// logical sections.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GlobalConfig {
	/// Keep track of the file we've read
	pub config_file_path: Option<PathBuf>,
	/// Global member config
	pub members: Option<ConfigMembers>,
}

/// Keeping an 'inner' structure here, as the top
/// level GlobalConfig might want to keep
/// internal state that we don't necessarily
/// want serialised or deserialised
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConfigMembers {
	/// Server config
	#[serde(default)]
	pub server: ServerConfig,
	/// Logging config
	pub logging: Option<LoggingConfig>,
}
