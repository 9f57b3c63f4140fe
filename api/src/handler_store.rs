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

//! Mutable, verb aware path trie for coarse request routing.
//!
//! Paths are split on `/` into literal segments, each segment is a trie node
//! and every node carries its own verb -> handler map. A lookup walks the
//! request target segment by segment and remembers the deepest node that has
//! a usable handler, so `a/b/c` shadows `a/b` for requests below `a/b/c` while
//! `a/b` keeps answering everything else below it. Whatever follows the
//! matched node (starting at the `/`, `?` or `#` delimiter) is handed back as
//! the tail, for the handler to route further.
//!
//! Handler selection on a node prefers the exact request method and falls
//! back to the `Verb::Any` registration.
//!
//! The store does no locking of its own. Share it between threads behind a
//! lock, as `HttpServer` does.

use crate::types::Verb;
use hyper::Method;
use std::collections::HashMap;
use std::fmt;

/// Characters which end a path segment in a request target.
const PATH_DELIMITERS: &[char] = &['/', '?', '#'];

type NodeMap<H> = HashMap<String, Node<H>>;

struct Node<H> {
	handlers: HashMap<Verb, H>,
	children: NodeMap<H>,
}

impl<H> Node<H> {
	fn new() -> Node<H> {
		Node {
			// get/post/put/delete
			handlers: HashMap::with_capacity(4),
			children: HashMap::new(),
		}
	}

	fn is_empty(&self) -> bool {
		self.handlers.is_empty() && self.children.is_empty()
	}

	fn handler(&self, method: &Method) -> Option<&H> {
		self.handlers
			.get(&Verb::from(method))
			.or_else(|| self.handlers.get(&Verb::Any))
	}
}

/// Longest registered prefix wins path trie.
pub struct HandlerStore<H> {
	base_path: String,
	nodes: NodeMap<H>,
}

impl<H> Default for HandlerStore<H> {
	fn default() -> Self {
		HandlerStore::new()
	}
}

impl<H> fmt::Debug for HandlerStore<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HandlerStore")
			.field("base_path", &self.base_path)
			.field("roots", &self.nodes.keys().collect::<Vec<_>>())
			.finish()
	}
}

impl<H> HandlerStore<H> {
	/// Store answering every target.
	pub fn new() -> HandlerStore<H> {
		HandlerStore::with_base_path("")
	}

	/// Store answering only targets below `base_path`; anything outside of
	/// it never matches.
	pub fn with_base_path(base_path: &str) -> HandlerStore<H> {
		HandlerStore {
			base_path: base_path.trim_matches('/').to_owned(),
			nodes: HashMap::new(),
		}
	}

	pub fn base_path(&self) -> &str {
		&self.base_path
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn clear(&mut self) {
		self.nodes.clear();
	}

	/// Registers `handler` for `verb` at `path`, replacing a previous
	/// registration of the same pair. Leading and trailing slashes of `path`
	/// are ignored.
	pub fn add(&mut self, verb: impl Into<Verb>, path: &str, handler: H) {
		let verb = verb.into();
		let path = path.trim_matches('/');
		let mut segments = path.split('/');
		let first = segments.next().unwrap_or_default();

		let mut node = self
			.nodes
			.entry(first.to_owned())
			.or_insert_with(Node::new);
		for segment in segments {
			node = node
				.children
				.entry(segment.to_owned())
				.or_insert_with(Node::new);
		}
		debug!("handler store: add {} /{}", verb, path);
		node.handlers.insert(verb, handler);
	}

	/// Same as `add` with the `Verb::Any` wildcard.
	pub fn add_any(&mut self, path: &str, handler: H) {
		self.add(Verb::Any, path, handler)
	}

	/// Unregisters the handler of `verb` at `path` and returns it. Nodes left
	/// without handlers and children are pruned, up to the root.
	pub fn remove(&mut self, verb: impl Into<Verb>, path: &str) -> Option<H> {
		let verb = verb.into();
		let path = path.trim_matches('/');
		let segments: Vec<&str> = path.split('/').collect();
		let removed = remove_helper(&verb, &segments, &mut self.nodes);
		if removed.is_some() {
			debug!("handler store: removed {} /{}", verb, path);
		}
		removed
	}

	/// Same as `remove` with the `Verb::Any` wildcard.
	pub fn remove_any(&mut self, path: &str) -> Option<H> {
		self.remove(Verb::Any, path)
	}

	/// Finds the handler of the deepest registered node on the path of
	/// `target` that answers `method`, and the unmatched tail of `target`.
	///
	/// The tail starts at the delimiter following the matched node, so it is
	/// either empty or begins with `/`, `?` or `#`. If no node on the path
	/// answers, a handler registered at the empty path is used with the whole
	/// target (base path removed) as tail. An empty target never reaches it.
	pub fn lookup<'s, 't>(
		&'s self,
		method: &Method,
		target: &'t str,
	) -> Option<(&'t str, &'s H)> {
		if self.nodes.is_empty() {
			return None;
		}
		let target = self.strip_base_path(target)?;
		let path = target.strip_prefix('/').unwrap_or(target);

		let mut nodes = &self.nodes;
		let mut matched = None;
		let mut start = 0;
		loop {
			let rest = &path[start..];
			let delimiter = rest.find(PATH_DELIMITERS).map(|pos| start + pos);
			let end = delimiter.unwrap_or_else(|| path.len());
			let part = &path[start..end];
			if part.is_empty() {
				break;
			}
			let node = match nodes.get(part) {
				Some(node) => node,
				None => break,
			};
			if let Some(handler) = node.handler(method) {
				matched = Some((&path[end..], handler));
			}
			nodes = &node.children;
			match delimiter {
				Some(pos) if path[pos..].starts_with('/') => start = pos + 1,
				_ => break,
			}
		}

		if matched.is_none() && !path.is_empty() {
			matched = self
				.nodes
				.get("")
				.and_then(|node| node.handler(method))
				.map(|handler| (target, handler));
		}
		matched
	}

	/// Target with the base path removed, `None` when the target is outside
	/// of the base path.
	fn strip_base_path<'t>(&self, target: &'t str) -> Option<&'t str> {
		if self.base_path.is_empty() {
			return Some(target);
		}
		let rest = target
			.trim_start_matches('/')
			.strip_prefix(self.base_path.as_str())?;
		if rest.is_empty() || rest.starts_with(PATH_DELIMITERS) {
			Some(rest)
		} else {
			None
		}
	}
}

fn remove_helper<H>(verb: &Verb, segments: &[&str], nodes: &mut NodeMap<H>) -> Option<H> {
	let (part, rest) = segments.split_first()?;
	let node = nodes.get_mut(*part)?;
	let removed = if rest.is_empty() {
		node.handlers.remove(verb)
	} else {
		remove_helper(verb, rest, &mut node.children)
	};
	if node.is_empty() {
		nodes.remove(*part);
	}
	removed
}
