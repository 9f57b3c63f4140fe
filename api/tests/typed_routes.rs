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
use hyper::Method;
use pretty_assertions::assert_eq;

fn noop(_: &Request, _: &mut Response, _: &Properties) -> Result<(), Error> {
	Ok(())
}

fn api() -> CompiledApi {
	Api::new(1)
		.route(Route::new(Method::GET, "users/<string:name>/posts", "by name", "", noop))
		.route(Route::new(Method::GET, "users/<int:id>", "by id", "", noop))
		.route(Route::new(Method::GET, "users/me", "me", "", noop))
		.route(Route::new(Method::PUT, "users/<string:name>", "rename", "", noop))
		.route(Route::new(Method::GET, "users/<int:id>/posts/<int:post>", "post", "", noop))
		.build()
		.unwrap()
}

fn resolve(api: &CompiledApi, method: Method, target: &str) -> Option<(String, Properties)> {
	api.lookup(&method, target)
		.map(|found| (found.route.description().to_owned(), found.properties))
}

#[test]
fn constants_beat_placeholders() {
	let api = api();
	assert_eq!(
		resolve(&api, Method::GET, "users/me"),
		Some(("me".to_owned(), Properties::new()))
	);
}

#[test]
fn integers_bind_typed_values() {
	let api = api();
	let (description, props) = resolve(&api, Method::GET, "users/42").unwrap();
	assert_eq!(description, "by id");
	assert_eq!(props.value::<i64>("id"), Ok(Some(42)));
	assert!(props.value::<String>("id").is_err());

	let (description, props) = resolve(&api, Method::GET, "/users/7/posts/9?page=2").unwrap();
	assert_eq!(description, "post");
	let expected: Properties = vec![("id", 7i64), ("post", 9i64)].into_iter().collect();
	assert_eq!(props, expected);
}

#[test]
fn non_numeric_segments_skip_integer_placeholders() {
	let api = api();
	assert_eq!(resolve(&api, Method::GET, "users/bob"), None);
	let (description, props) = resolve(&api, Method::GET, "users/bob/posts").unwrap();
	assert_eq!(description, "by name");
	assert_eq!(props.value::<String>("name"), Ok(Some("bob".to_owned())));
}

#[test]
fn failed_subtree_falls_back_to_next_sibling() {
	let api = api();
	// "42" is eligible for <int:id> first, which has no PUT route.
	let (description, props) = resolve(&api, Method::PUT, "users/42").unwrap();
	assert_eq!(description, "rename");
	assert_eq!(props.value::<String>("name"), Ok(Some("42".to_owned())));

	// <int:id> has no "posts" leaf of its own, <string:name> has.
	let (description, _) = resolve(&api, Method::GET, "users/42/posts").unwrap();
	assert_eq!(description, "by name");
}

#[test]
fn malformed_templates_are_rejected() {
	for uri in &["a/<int>", "a/<:x>", "a/<int:>", "a/<uuid:x>", "a/<int:x", "a//b"] {
		let result = Api::new(1)
			.route(Route::new(Method::GET, uri, "", "", noop))
			.build();
		match result {
			Err(BuildError::MalformedTemplate { .. }) => {}
			other => panic!("{} gave {:?}", uri, other.map(|_| ())),
		}
	}
	match Api::new(1).route(Route::new(Method::GET, "/", "", "", noop)).build() {
		Err(BuildError::EmptyTemplate(_)) => {}
		other => panic!("empty template gave {:?}", other.map(|_| ())),
	}
}
