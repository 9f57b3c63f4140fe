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

use crate::error::BuildError;
use crate::properties::Properties;
use hyper::Method;

/// Node types
///
/// Const for a literal segment.
/// VarString for a `<string:name>` placeholder.
/// Integer for a `<int:name>` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
	Const,
	VarString,
	Integer,
}

impl NodeKind {
	/// Order in which siblings are tried, lower first.
	fn rank(self) -> u8 {
		match self {
			NodeKind::Const => 0,
			NodeKind::Integer => 1,
			NodeKind::VarString => 2,
		}
	}
}

/// Node of the typed route trie
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNode {
	pub kind: NodeKind,
	/// Literal for constants, bound name for placeholders
	pub id: String,
	/// Routes ending on this node, as (method, index in the route table)
	pub routes: Vec<(Method, usize)>,
	pub children: Vec<ParsedNode>,
}

impl ParsedNode {
	/// Parses one segment of the template `uri`.
	pub fn parse(uri: &str, segment: &str) -> Result<ParsedNode, BuildError> {
		let malformed = |reason: &str| BuildError::MalformedTemplate {
			uri: uri.to_owned(),
			segment: segment.to_owned(),
			reason: reason.to_owned(),
		};

		if segment.is_empty() {
			return Err(malformed("empty segment"));
		}
		if !segment.starts_with('<') {
			return Ok(ParsedNode::new(NodeKind::Const, segment));
		}

		let inner = segment
			.strip_prefix('<')
			.and_then(|s| s.strip_suffix('>'))
			.ok_or_else(|| malformed("placeholder is not closed by '>'"))?;
		let mut parts = inner.split(':');
		let (type_tag, name) = match (parts.next(), parts.next(), parts.next()) {
			(Some(t), Some(n), None) => (t, n),
			_ => return Err(malformed("placeholder must be <type:name>")),
		};
		if type_tag.is_empty() {
			return Err(malformed("placeholder type is missing"));
		}
		if name.is_empty() {
			return Err(malformed("placeholder name is missing"));
		}
		match type_tag {
			"string" => Ok(ParsedNode::new(NodeKind::VarString, name)),
			"int" => Ok(ParsedNode::new(NodeKind::Integer, name)),
			_ => Err(malformed("unknown placeholder type")),
		}
	}

	fn new(kind: NodeKind, id: &str) -> ParsedNode {
		ParsedNode {
			kind,
			id: id.to_owned(),
			routes: vec![],
			children: vec![],
		}
	}

	/// Whether `other` denotes the same trie node, routes and children aside.
	pub fn same_as(&self, other: &ParsedNode) -> bool {
		self.kind == other.kind && self.id == other.id
	}

	pub(super) fn accepts(&self, segment: &Segment<'_>) -> bool {
		match self.kind {
			NodeKind::Const => self.id == segment.text,
			NodeKind::VarString => true,
			NodeKind::Integer => segment.number.is_some(),
		}
	}

	pub(super) fn bind(&self, segment: &Segment<'_>, properties: &mut Properties) {
		match (self.kind, segment.number) {
			(NodeKind::VarString, _) => properties.insert(self.id.as_str(), segment.text),
			(NodeKind::Integer, Some(number)) => properties.insert(self.id.as_str(), number),
			_ => {}
		}
	}

	/// Sorts siblings, recursively, into lookup order.
	pub(super) fn sort_children(nodes: &mut Vec<ParsedNode>) {
		nodes.sort_by_key(|n| n.kind.rank());
		for node in nodes.iter_mut() {
			ParsedNode::sort_children(&mut node.children);
		}
	}
}

/// One segment of a request path, with its integer reading if it has one.
#[derive(Debug)]
pub(super) struct Segment<'a> {
	pub text: &'a str,
	pub number: Option<i64>,
}

impl<'a> Segment<'a> {
	pub fn new(text: &'a str) -> Segment<'a> {
		let numeric = text.bytes().next().map_or(false, |b| b.is_ascii_digit());
		let number = if numeric { text.parse().ok() } else { None };
		Segment { text, number }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(segment: &str) -> Result<ParsedNode, BuildError> {
		ParsedNode::parse("test/uri", segment)
	}

	#[test]
	fn parses_segments() {
		let node = parse("resource").unwrap();
		assert_eq!((node.kind, node.id.as_str()), (NodeKind::Const, "resource"));
		let node = parse("<string:id>").unwrap();
		assert_eq!((node.kind, node.id.as_str()), (NodeKind::VarString, "id"));
		let node = parse("<int:id>").unwrap();
		assert_eq!((node.kind, node.id.as_str()), (NodeKind::Integer, "id"));
	}

	#[test]
	fn rejects_malformed_placeholders() {
		for segment in &[
			"",
			"<string:id",
			"<>",
			"<:id>",
			"<int:>",
			"<id>",
			"<float:x>",
			"<int:a:b>",
		] {
			match parse(segment) {
				Err(BuildError::MalformedTemplate { segment: s, .. }) => assert_eq!(&s, segment),
				other => panic!("{:?} parsed as {:?}", segment, other),
			}
		}
	}

	#[test]
	fn identity_is_kind_and_id() {
		let a = parse("<string:id>").unwrap();
		let b = parse("<string:id>").unwrap();
		let c = parse("<int:id>").unwrap();
		let d = parse("id").unwrap();
		assert!(a.same_as(&b));
		assert!(!a.same_as(&c));
		assert!(!a.same_as(&d));
	}

	#[test]
	fn integer_segments() {
		assert_eq!(Segment::new("42").number, Some(42));
		assert_eq!(Segment::new("0042").number, Some(42));
		assert_eq!(Segment::new("abc").number, None);
		assert_eq!(Segment::new("42abc").number, None);
		assert_eq!(Segment::new("-1").number, None);
		assert_eq!(Segment::new("+1").number, None);
		assert_eq!(Segment::new("99999999999999999999").number, None);
	}

	#[test]
	fn eligibility() {
		let constant = parse("all").unwrap();
		let string = parse("<string:id>").unwrap();
		let int = parse("<int:id>").unwrap();

		let word = Segment::new("all");
		let number = Segment::new("7");
		assert!(constant.accepts(&word));
		assert!(!constant.accepts(&number));
		assert!(string.accepts(&word) && string.accepts(&number));
		assert!(int.accepts(&number));
		assert!(!int.accepts(&word));

		let mut props = Properties::new();
		int.bind(&number, &mut props);
		assert_eq!(props.value::<i64>("id"), Ok(Some(7)));
		constant.bind(&word, &mut props);
		assert_eq!(props.len(), 1);
	}
}
