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

//! Errors that can be returned by request handlers and by the route builder.

/// Errors surfaced to handlers and to the code wiring a server together.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum Error {
	/// Internal error
	#[error("Internal error: {0}")]
	Internal(String),
	/// Bad arguments supplied by the client
	#[error("Bad arguments: {0}")]
	Argument(String),
	/// Requested entity not found
	#[error("Not found.")]
	NotFound,
	/// The request could not be read or decoded
	#[error("Request error: {0}")]
	RequestError(String),
	/// The response could not be produced
	#[error("ResponseError error: {0}")]
	ResponseError(String),
	/// A declared route could not be compiled
	#[error("Build error: {0}")]
	Build(#[from] BuildError),
	/// A bound property was accessed under the wrong type
	#[error("Property error: {0}")]
	Property(#[from] PropertyError),
	/// Transport failure
	#[error("Hyper error: {0}")]
	Hyper(String),
}

/// Raised while compiling declared URI templates into the matcher trie.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum BuildError {
	/// A template segment looks like a placeholder but is not `<type:name>`
	/// with a known type tag.
	#[error("Malformed template {uri:?}, segment {segment:?}: {reason}")]
	MalformedTemplate {
		/// The full declared template
		uri: String,
		/// The offending segment
		segment: String,
		/// What is wrong with it
		reason: String,
	},
	/// The template has no segments at all
	#[error("Empty template for {0} route")]
	EmptyTemplate(String),
}

/// Raised when reading a bound property under a type other than the one it
/// was bound with.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum PropertyError {
	/// Stored kind differs from the requested kind
	#[error("Property {name:?} holds {found}, requested as {expected}")]
	TypeMismatch {
		/// Property name
		name: String,
		/// Requested kind
		expected: &'static str,
		/// Stored kind
		found: &'static str,
	},
}

impl From<hyper::Error> for Error {
	fn from(error: hyper::Error) -> Error {
		Error::Hyper(error.to_string())
	}
}

impl From<serde_json::Error> for Error {
	fn from(error: serde_json::Error) -> Error {
		Error::RequestError(format!("Invalid request body: {}", error))
	}
}
