// xmlrec - Streaming XML to JSON records
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Element events consumed by the tree walker.

use std::fmt;

/// One step of an already-tokenized XML document.
///
/// Text is only delivered with the close event, because the tokenizer has
/// only seen all of an element's leading text once the element ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// An element was opened.
    Open {
        /// Tag name as written in the document
        name: String,
    },
    /// An element was closed.
    Close {
        /// Tag name as written in the document
        name: String,
        /// Leading text of the element, `None` when absent or whitespace-only
        text: Option<String>,
    },
}

impl XmlEvent {
    /// Create an open event.
    pub fn open(name: impl Into<String>) -> Self {
        XmlEvent::Open { name: name.into() }
    }

    /// Create a close event. Whitespace-only text is treated as absent.
    pub fn close(name: impl Into<String>, text: Option<&str>) -> Self {
        XmlEvent::Close {
            name: name.into(),
            text: text.filter(|t| !t.trim().is_empty()).map(str::to_string),
        }
    }

    /// Tag name of the event.
    pub fn name(&self) -> &str {
        match self {
            XmlEvent::Open { name } | XmlEvent::Close { name, .. } => name,
        }
    }
}

impl fmt::Display for XmlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlEvent::Open { name } => write!(f, "<{}>", name),
            XmlEvent::Close { name, text: Some(text) } => write!(f, "{:?}</{}>", text, name),
            XmlEvent::Close { name, text: None } => write!(f, "</{}>", name),
        }
    }
}
