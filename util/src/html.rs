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

/// Escapes the characters that are significant in HTML text and attributes.
pub fn html_escape(data: &str) -> String {
	let mut result = String::with_capacity(data.len() + data.len() / 10);
	for c in data.chars() {
		match c {
			'&' => result.push_str("&amp;"),
			'"' => result.push_str("&quot;"),
			'\'' => result.push_str("&apos;"),
			'<' => result.push_str("&lt;"),
			'>' => result.push_str("&gt;"),
			_ => result.push(c),
		}
	}
	result
}
