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

use super::route::{DocSample, EndpointHandler, Route};
use super::trie::RouteTrie;
use crate::error::BuildError;
use crate::properties::Properties;
use hyper::Method;

/// Declaration of one API version.
///
/// Defined to separate declaring routes, which mutates state, from looking
/// up the route of a request, which never does.
#[derive(Debug, Clone)]
pub struct Api {
	version: u32,
	routes: Vec<Route>,
}

impl Default for Api {
	fn default() -> Self {
		Api::new(1)
	}
}

impl Api {
	pub fn new(version: u32) -> Api {
		Api {
			version,
			routes: vec![],
		}
	}

	pub fn version(&self) -> u32 {
		self.version
	}

	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	pub fn add_route(&mut self, route: Route) -> &mut Api {
		self.routes.push(route);
		self
	}

	pub fn route(mut self, route: Route) -> Api {
		self.routes.push(route);
		self
	}

	pub fn get<O, H>(self, uri: &str, description: &str, response_status: &str, handler: H) -> Api
	where
		O: DocSample,
		H: EndpointHandler + 'static,
	{
		self.route(Route::get::<O, H>(uri, description, response_status, handler))
	}

	pub fn post<I, O, H>(
		self,
		uri: &str,
		description: &str,
		response_status: &str,
		handler: H,
	) -> Api
	where
		I: DocSample,
		O: DocSample,
		H: EndpointHandler + 'static,
	{
		self.route(Route::post::<I, O, H>(uri, description, response_status, handler))
	}

	pub fn put<I, H>(self, uri: &str, description: &str, response_status: &str, handler: H) -> Api
	where
		I: DocSample,
		H: EndpointHandler + 'static,
	{
		self.route(Route::put::<I, H>(uri, description, response_status, handler))
	}

	pub fn delete<H>(self, uri: &str, description: &str, response_status: &str, handler: H) -> Api
	where
		H: EndpointHandler + 'static,
	{
		self.route(Route::delete(uri, description, response_status, handler))
	}

	/// Compiles the declared routes. Fails on the first malformed template.
	pub fn build(self) -> Result<CompiledApi, BuildError> {
		let trie = RouteTrie::build(&self.routes)?;
		debug!(
			"api v{}: compiled {} routes",
			self.version,
			self.routes.len()
		);
		Ok(CompiledApi {
			version: self.version,
			routes: self.routes,
			trie,
		})
	}
}

/// Result of a successful typed lookup.
#[derive(Debug)]
pub struct LookupResult<'a> {
	pub route: &'a Route,
	pub properties: Properties,
}

/// Immutable, compiled API version.
#[derive(Debug)]
pub struct CompiledApi {
	version: u32,
	routes: Vec<Route>,
	trie: RouteTrie,
}

impl CompiledApi {
	pub fn version(&self) -> u32 {
		self.version
	}

	/// Routes in declaration order.
	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	pub fn trie(&self) -> &RouteTrie {
		&self.trie
	}

	/// Finds the route declared for `method` matching `target`, a path
	/// relative to the API root.
	pub fn lookup(&self, method: &Method, target: &str) -> Option<LookupResult<'_>> {
		let (index, properties) = self.trie.lookup(method, target)?;
		let route = self.routes.get(index)?;
		Some(LookupResult { route, properties })
	}
}
