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

//! Typed values bound from path placeholders.

use crate::error::PropertyError;
use std::collections::hash_map::{self, HashMap};
use std::iter::FromIterator;
use std::ops::Add;

/// A bound property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Int(i64),
	String(String),
	Bytes(Vec<u8>),
	Bool(bool),
	Float(f64),
}

impl Value {
	/// Name of the stored kind, used in error reports.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Int(_) => i64::KIND,
			Value::String(_) => String::KIND,
			Value::Bytes(_) => <Vec<u8>>::KIND,
			Value::Bool(_) => bool::KIND,
			Value::Float(_) => f64::KIND,
		}
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Value {
		Value::Int(v)
	}
}

impl From<String> for Value {
	fn from(v: String) -> Value {
		Value::String(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Value {
		Value::String(v.to_owned())
	}
}

impl From<Vec<u8>> for Value {
	fn from(v: Vec<u8>) -> Value {
		Value::Bytes(v)
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Value {
		Value::Bool(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Value {
		Value::Float(v)
	}
}

/// Rust types a `Value` can be read back as. Each type reads exactly one
/// kind; there is no conversion between kinds.
pub trait FromValue: Sized {
	const KIND: &'static str;

	fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for i64 {
	const KIND: &'static str = "int";

	fn from_value(value: &Value) -> Option<i64> {
		match value {
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}
}

impl FromValue for String {
	const KIND: &'static str = "string";

	fn from_value(value: &Value) -> Option<String> {
		match value {
			Value::String(v) => Some(v.clone()),
			_ => None,
		}
	}
}

impl FromValue for Vec<u8> {
	const KIND: &'static str = "bytes";

	fn from_value(value: &Value) -> Option<Vec<u8>> {
		match value {
			Value::Bytes(v) => Some(v.clone()),
			_ => None,
		}
	}
}

impl FromValue for bool {
	const KIND: &'static str = "bool";

	fn from_value(value: &Value) -> Option<bool> {
		match value {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}
}

impl FromValue for f64 {
	const KIND: &'static str = "float";

	fn from_value(value: &Value) -> Option<f64> {
		match value {
			Value::Float(v) => Some(*v),
			_ => None,
		}
	}
}

/// Name -> value map produced by a successful typed match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
	params: HashMap<String, Value>,
}

impl Properties {
	pub fn new() -> Properties {
		Properties::default()
	}

	/// Binds `name`, replacing a previous binding.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
		self.params.insert(name.into(), value.into());
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.params.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.params.contains_key(name)
	}

	/// Typed read. `Ok(None)` when unbound, an error when bound under another
	/// kind.
	pub fn value<T: FromValue>(&self, name: &str) -> Result<Option<T>, PropertyError> {
		match self.params.get(name) {
			None => Ok(None),
			Some(v) => T::from_value(v).map(Some).ok_or_else(|| {
				PropertyError::TypeMismatch {
					name: name.to_owned(),
					expected: T::KIND,
					found: v.kind(),
				}
			}),
		}
	}

	/// Typed read falling back to `default` when unbound.
	pub fn value_or<T: FromValue>(&self, name: &str, default: T) -> Result<T, PropertyError> {
		Ok(self.value(name)?.unwrap_or(default))
	}

	pub fn len(&self) -> usize {
		self.params.len()
	}

	pub fn is_empty(&self) -> bool {
		self.params.is_empty()
	}

	pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
		self.params.iter()
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Properties {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Properties {
		Properties {
			params: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

/// Union of both maps. A name bound on both sides keeps the left value.
impl Add for Properties {
	type Output = Properties;

	fn add(mut self, other: Properties) -> Properties {
		for (k, v) in other.params {
			self.params.entry(k).or_insert(v);
		}
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn typed_access() {
		let mut props = Properties::new();
		props.insert("id", 42i64);
		props.insert("name", "abc");
		props.insert("raw", vec![1u8, 2]);
		props.insert("flag", true);
		props.insert("ratio", 0.5);

		assert_eq!(props.value::<i64>("id"), Ok(Some(42)));
		assert_eq!(props.value::<String>("name"), Ok(Some("abc".to_owned())));
		assert_eq!(props.value::<Vec<u8>>("raw"), Ok(Some(vec![1, 2])));
		assert_eq!(props.value::<bool>("flag"), Ok(Some(true)));
		assert_eq!(props.value::<f64>("ratio"), Ok(Some(0.5)));
		assert_eq!(props.value::<i64>("missing"), Ok(None));
		assert_eq!(props.len(), 5);
	}

	#[test]
	fn defaults_only_apply_when_unbound() {
		let props: Properties = vec![("id", 7i64)].into_iter().collect();
		assert_eq!(props.value_or("id", 1i64), Ok(7));
		assert_eq!(props.value_or("other", 1i64), Ok(1));
		assert_eq!(props.value_or("other", "x".to_owned()), Ok("x".to_owned()));
	}

	#[test]
	fn kind_mismatch_is_an_error() {
		let mut props = Properties::new();
		props.insert("id", "42");
		assert_eq!(
			props.value::<i64>("id"),
			Err(PropertyError::TypeMismatch {
				name: "id".to_owned(),
				expected: "int",
				found: "string",
			})
		);
		assert!(props.value_or("id", 0i64).is_err());
	}

	#[test]
	fn merge_keeps_left_values() {
		let a: Properties = vec![("x", 1i64), ("y", 2i64)].into_iter().collect();
		let b: Properties = vec![("y", 20i64), ("z", 30i64)].into_iter().collect();
		let merged = a + b;
		assert_eq!(merged.len(), 3);
		assert_eq!(merged.value::<i64>("y"), Ok(Some(2)));
		assert_eq!(merged.value::<i64>("z"), Ok(Some(30)));
	}
}
