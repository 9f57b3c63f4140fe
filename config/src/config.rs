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

//! Configuration file management

use std::fs::{self, File};
use std::io::prelude::*;
use std::path::PathBuf;

use crate::comments::insert_comments;
use crate::types::{ConfigError, ConfigMembers, GlobalConfig, ServerConfig};
use crate::util::LoggingConfig;

/// The default file name to use when trying to derive
/// the config file location
pub const CONFIG_FILE_NAME: &str = "pathway.toml";
const PATHWAY_HOME: &str = ".pathway";

/// Directory the default configuration lives in, `~/.pathway`, or
/// `.pathway` in the working directory when there is no home.
pub fn get_pathway_path() -> PathBuf {
	let mut path = dirs::home_dir().unwrap_or_else(PathBuf::new);
	path.push(PATHWAY_HOME);
	path
}

/// Handles setup and detection of paths, which configuration to use
/// etc
pub fn initial_setup(config_file_path: Option<&str>) -> Result<GlobalConfig, ConfigError> {
	// Just attempt to load and error if there's an issue
	if let Some(p) = config_file_path {
		return GlobalConfig::new(p);
	}

	let pathway_path = get_pathway_path();
	if !pathway_path.exists() {
		fs::create_dir_all(&pathway_path)?;
	}
	let mut config_path = pathway_path;
	config_path.push(CONFIG_FILE_NAME);

	// Spit it out if it doesn't exist
	if !config_path.exists() {
		GlobalConfig::default().write_to_file(&config_path)?;
	}
	GlobalConfig::new(config_path)
}

/// Returns the defaults, as strewn throughout the code
impl Default for ConfigMembers {
	fn default() -> ConfigMembers {
		ConfigMembers {
			server: ServerConfig::default(),
			logging: Some(LoggingConfig::default()),
		}
	}
}

impl Default for GlobalConfig {
	fn default() -> GlobalConfig {
		GlobalConfig {
			config_file_path: None,
			members: Some(ConfigMembers::default()),
		}
	}
}

impl GlobalConfig {
	/// Requires the path to a config file
	pub fn new(file_path: impl Into<PathBuf>) -> Result<GlobalConfig, ConfigError> {
		let config_file = file_path.into();
		// Config file path is given but not valid
		if !config_file.exists() {
			return Err(ConfigError::FileNotFoundError(
				config_file.display().to_string(),
			));
		}
		let mut config = GlobalConfig::default();
		config.config_file_path = Some(config_file);

		// Try to parse the config file if it exists, explode if it does exist but
		// something's wrong with it
		config.read_config()
	}

	/// Read config
	fn read_config(mut self) -> Result<GlobalConfig, ConfigError> {
		let path = match self.config_file_path.clone() {
			Some(path) => path,
			None => return Ok(self),
		};
		let mut file = File::open(&path)?;
		let mut contents = String::new();
		file.read_to_string(&mut contents)?;
		let members: ConfigMembers = toml::from_str(&contents)
			.map_err(|e| ConfigError::ParseError(path.display().to_string(), e.to_string()))?;
		self.members = Some(members);
		Ok(self)
	}

	/// Server section, defaults when the members are missing.
	pub fn server(&self) -> ServerConfig {
		self.members
			.as_ref()
			.map(|m| m.server.clone())
			.unwrap_or_default()
	}

	/// Logging section, if any.
	pub fn logging(&self) -> Option<LoggingConfig> {
		self.members.as_ref().and_then(|m| m.logging.clone())
	}

	/// Serialize config
	pub fn ser_config(&self) -> Result<String, ConfigError> {
		let members = self.members.clone().unwrap_or_default();
		toml::to_string(&members).map_err(|e| ConfigError::SerializationError(e.to_string()))
	}

	/// Write configuration to a file
	pub fn write_to_file(&self, name: impl AsRef<std::path::Path>) -> Result<(), ConfigError> {
		let conf_out = insert_comments(self.ser_config()?);
		let mut file = File::create(name)?;
		file.write_all(conf_out.as_bytes())?;
		Ok(())
	}
}
