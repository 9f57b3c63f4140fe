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

//! Typed route matching for versioned REST APIs.
//!
//! An `Api` collects route declarations. Each route has a URI template made of
//! `/` separated segments, where a segment is either a literal or a typed
//! placeholder:
//!
//! ```text
//!   resource                  literal
//!   resource/<string:id>      binds any segment as string "id"
//!   resource/<int:id>         binds a decimal segment as integer "id"
//! ```
//!
//! `Api::build` compiles the templates into a trie once. Templates sharing a
//! prefix share nodes, two nodes being the same when they have the same kind
//! and identifier (the literal for constants, the bound name for
//! placeholders). The compiled trie is never mutated again, so a
//! `CompiledApi` can be shared between any number of readers.
//!
//! Lookup matches one segment per level. Literal nodes are tried first, then
//! integer placeholders, then string placeholders, each class in declaration
//! order. If the subtree of an eligible node does not produce a route for the
//! request method the next eligible sibling is tried. A segment which does not
//! parse as an integer is simply not eligible for integer placeholders.
//!
//! Trie leaves keep indices into the route table of the `CompiledApi` rather
//! than references to the routes.

mod api;
mod node;
mod route;
mod trie;

pub use self::api::{Api, CompiledApi, LookupResult};
pub use self::node::{NodeKind, ParsedNode};
pub use self::route::{DocSample, EndpointHandler, HandlerFuture, NoPayload, Route};
pub use self::trie::RouteTrie;
