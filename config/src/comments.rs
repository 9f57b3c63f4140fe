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

//! Comments for configuration + injection into output .toml
use std::collections::HashMap;

/// maps entries to Comments that should precede them
fn comments() -> HashMap<String, String> {
	let mut retval = HashMap::new();
	retval.insert(
		"[server]".to_string(),
		"
# Generated Server Configuration File for Pathway
#
# When running the pathway executable without a --config argument,
# it will look for this file in [user home]/.pathway
#

#########################################
### SERVER CONFIGURATION              ###
#########################################
"
		.to_string(),
	);

	retval.insert(
		"bind_address".to_string(),
		"
#the address the HTTP listener binds to, 0.0.0.0 for all interfaces
"
		.to_string(),
	);

	retval.insert(
		"bind_port".to_string(),
		"
#the port the HTTP listener binds to
"
		.to_string(),
	);

	retval.insert(
		"base_path".to_string(),
		"
#path prefix of every served URL, empty to serve from the root
"
		.to_string(),
	);

	retval.insert(
		"service_name".to_string(),
		"
#name announced in the Server header of every response
"
		.to_string(),
	);

	retval.insert(
		"[logging]".to_string(),
		"
#########################################
### LOGGING CONFIGURATION             ###
#########################################
"
		.to_string(),
	);

	retval.insert(
		"log_to_stdout".to_string(),
		"
#whether to log to stdout
"
		.to_string(),
	);

	retval.insert(
		"stdout_log_level".to_string(),
		"
#log level for stdout: Error, Warning, Info, Debug, Trace
"
		.to_string(),
	);

	retval.insert(
		"log_to_file".to_string(),
		"
#whether to log to a file
"
		.to_string(),
	);

	retval.insert(
		"file_log_level".to_string(),
		"
#log level for file: Error, Warning, Info, Debug, Trace
"
		.to_string(),
	);

	retval.insert(
		"log_file_path".to_string(),
		"
#log file path
"
		.to_string(),
	);

	retval.insert(
		"log_file_append".to_string(),
		"
#whether to append to the log file (true), or replace it on every run (false)
"
		.to_string(),
	);

	retval.insert(
		"log_max_size".to_string(),
		"
#maximum log file size in bytes before performing log rotation
#comment it to disable log rotation
"
		.to_string(),
	);

	retval.insert(
		"log_max_files".to_string(),
		"
#maximum count of the log files to rotate over
"
		.to_string(),
	);

	retval
}

fn get_key(line: &str) -> String {
	if line.contains('[') && line.contains(']') {
		line.to_owned()
	} else if let Some(pos) = line.find('=') {
		line[..pos].trim().to_owned()
	} else {
		"NOT_FOUND".to_owned()
	}
}

/// Precedes every known key of the serialized configuration with its
/// explanation.
pub fn insert_comments(orig: String) -> String {
	let comments = comments();
	let mut ret_val = String::with_capacity(orig.len() * 2);
	for l in orig.split('\n') {
		if let Some(v) = comments.get(&get_key(l)) {
			ret_val.push_str(v);
		}
		ret_val.push_str(l);
		ret_val.push('\n');
	}
	ret_val
}
