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

use super::node::{ParsedNode, Segment};
use super::route::Route;
use crate::error::BuildError;
use crate::properties::Properties;
use crate::types::QUERY_DELIMITERS;
use hyper::Method;

/// Typed route trie, built once from a route table.
///
/// Leaves carry `(method, index)` pairs where the index points into the
/// table the trie was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTrie {
	roots: Vec<ParsedNode>,
}

impl RouteTrie {
	/// Compiles the URI templates of `routes`. Any malformed template fails
	/// the whole build.
	pub fn build(routes: &[Route]) -> Result<RouteTrie, BuildError> {
		let mut roots = vec![];
		for (index, route) in routes.iter().enumerate() {
			let mut segments = parse_template(route.uri())?.into_iter();
			let first = segments
				.next()
				.ok_or_else(|| BuildError::EmptyTemplate(route.method().to_string()))?;

			let mut node = child_entry(&mut roots, first);
			for segment in segments {
				node = child_entry(&mut node.children, segment);
			}
			if node.routes.iter().any(|(m, _)| m == route.method()) {
				warn!(
					"route {} {} declared twice, the first declaration wins",
					route.method(),
					route.uri()
				);
			}
			node.routes.push((route.method().clone(), index));
		}
		ParsedNode::sort_children(&mut roots);
		Ok(RouteTrie { roots })
	}

	pub fn roots(&self) -> &[ParsedNode] {
		&self.roots
	}

	/// Matches `target` for `method`. Returns the index of the route and the
	/// values bound by the placeholders along the matched path.
	pub fn lookup(&self, method: &Method, target: &str) -> Option<(usize, Properties)> {
		let path = match target.find(QUERY_DELIMITERS) {
			Some(pos) => &target[..pos],
			None => target,
		};
		let segments: Vec<Segment<'_>> = path
			.split('/')
			.filter(|s| !s.is_empty())
			.map(Segment::new)
			.collect();
		if segments.is_empty() {
			return None;
		}

		let mut properties = Properties::new();
		let index = lookup_helper(method, &segments, &self.roots, &mut properties)?;
		Some((index, properties))
	}
}

/// Splits a template into parsed nodes, surrounding slashes ignored.
fn parse_template(uri: &str) -> Result<Vec<ParsedNode>, BuildError> {
	let trimmed = uri.trim_matches('/');
	if trimmed.is_empty() {
		return Ok(vec![]);
	}
	trimmed
		.split('/')
		.map(|segment| ParsedNode::parse(uri, segment))
		.collect()
}

fn child_entry(nodes: &mut Vec<ParsedNode>, node: ParsedNode) -> &mut ParsedNode {
	let pos = match nodes.iter().position(|n| n.same_as(&node)) {
		Some(pos) => pos,
		None => {
			nodes.push(node);
			nodes.len() - 1
		}
	};
	&mut nodes[pos]
}

fn lookup_helper(
	method: &Method,
	segments: &[Segment<'_>],
	nodes: &[ParsedNode],
	properties: &mut Properties,
) -> Option<usize> {
	let (segment, rest) = segments.split_first()?;
	for node in nodes.iter().filter(|n| n.accepts(segment)) {
		let found = if rest.is_empty() {
			node.routes
				.iter()
				.find(|(m, _)| m == method)
				.map(|(_, index)| *index)
		} else {
			lookup_helper(method, rest, &node.children, properties)
		};
		if let Some(index) = found {
			node.bind(segment, properties);
			return Some(index);
		}
	}
	None
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mapper::NodeKind;
	use crate::types::{Request, Response};
	use crate::Error;

	fn noop(_: &Request, _: &mut Response, _: &Properties) -> Result<(), Error> {
		Ok(())
	}

	fn route(method: Method, uri: &str) -> Route {
		Route::new(method, uri, "", "", noop)
	}

	#[test]
	fn shares_prefixes() {
		let routes = vec![
			route(Method::POST, "resource"),
			route(Method::GET, "resource/<string:id>"),
			route(Method::DELETE, "resource/<string:id>"),
			route(Method::GET, "resource/<int:id>"),
		];
		let trie = RouteTrie::build(&routes).unwrap();
		assert_eq!(trie.roots().len(), 1);
		let resource = &trie.roots()[0];
		assert_eq!(resource.routes, vec![(Method::POST, 0)]);
		assert_eq!(resource.children.len(), 2);
		// integer placeholders sort ahead of string ones
		assert_eq!(resource.children[0].kind, NodeKind::Integer);
		assert_eq!(resource.children[1].kind, NodeKind::VarString);
		assert_eq!(
			resource.children[1].routes,
			vec![(Method::GET, 1), (Method::DELETE, 2)]
		);
	}

	#[test]
	fn surrounding_slashes_are_ignored() {
		let routes = vec![route(Method::GET, "/a/b/")];
		let trie = RouteTrie::build(&routes).unwrap();
		assert_eq!(trie.lookup(&Method::GET, "a/b").map(|r| r.0), Some(0));
		assert_eq!(trie.lookup(&Method::GET, "//a//b/").map(|r| r.0), Some(0));
	}

	#[test]
	fn malformed_template_fails_the_build() {
		let routes = vec![
			route(Method::GET, "fine"),
			route(Method::GET, "broken/<uint:id>"),
		];
		match RouteTrie::build(&routes) {
			Err(BuildError::MalformedTemplate { uri, segment, .. }) => {
				assert_eq!(uri, "broken/<uint:id>");
				assert_eq!(segment, "<uint:id>");
			}
			other => panic!("unexpected {:?}", other),
		}
		let routes = vec![route(Method::GET, "a//b")];
		assert!(RouteTrie::build(&routes).is_err());
		let routes = vec![route(Method::GET, "/")];
		assert_eq!(
			RouteTrie::build(&routes),
			Err(BuildError::EmptyTemplate("GET".to_owned()))
		);
	}

	#[test]
	fn backtracks_into_placeholder_siblings() {
		let routes = vec![
			route(Method::GET, "item/special/detail"),
			route(Method::GET, "item/<string:id>/summary"),
		];
		let trie = RouteTrie::build(&routes).unwrap();
		let (index, props) = trie.lookup(&Method::GET, "item/special/summary").unwrap();
		assert_eq!(index, 1);
		assert_eq!(props.value::<String>("id"), Ok(Some("special".to_owned())));

		let (index, props) = trie.lookup(&Method::GET, "item/special/detail").unwrap();
		assert_eq!(index, 0);
		assert!(props.is_empty());
	}

	#[test]
	fn binds_only_along_the_matched_path() {
		let routes = vec![
			route(Method::GET, "<int:a>/x"),
			route(Method::GET, "<string:b>/y"),
		];
		let trie = RouteTrie::build(&routes).unwrap();
		let (index, props) = trie.lookup(&Method::GET, "5/y").unwrap();
		assert_eq!(index, 1);
		assert_eq!(props.len(), 1);
		assert_eq!(props.value::<String>("b"), Ok(Some("5".to_owned())));
	}

	#[test]
	fn query_and_fragment_are_not_segments() {
		let routes = vec![route(Method::GET, "resource/<string:id>")];
		let trie = RouteTrie::build(&routes).unwrap();
		let (_, props) = trie.lookup(&Method::GET, "/resource/abc?x=1#f").unwrap();
		assert_eq!(props.value::<String>("id"), Ok(Some("abc".to_owned())));
		assert!(trie.lookup(&Method::GET, "?x=1").is_none());
	}
}
