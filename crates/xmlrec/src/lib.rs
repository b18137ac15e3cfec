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

//! Streaming XML to JSON records
//!
//! Converts large, deeply nested XML documents into newline-delimited JSON
//! without materializing the document in memory.
//!
//! # How it works
//!
//! - A tokenizer ([`XmlEventReader`]) produces open/close events with the
//!   element's text attached to the close event.
//! - The [`TreeWalker`] keeps one [`Node`] per schema position (the path of
//!   tag names from the top element) in a [`NodeRegistry`], however often the
//!   position repeats.
//! - When an element closes its value is composed as a pair (text or `null`),
//!   an array of one-key mappings, or an object, depending on its children.
//! - The value is then written as a record, left for the parent, or held until
//!   a donated foreign key arrives.
//!
//! # Examples
//!
//! ## Whole document as one record
//!
//! ```rust
//! use xmlrec::{convert_str, ConvertConfig};
//!
//! let out = convert_str("<r><x>1</x><y>2</y></r>", &ConvertConfig::full()).unwrap();
//! assert_eq!(out, "{\"r\":{\"x\":\"1\",\"y\":\"2\"}}\n");
//! ```
//!
//! ## One record per target element, with a donated key
//!
//! ```rust
//! use xmlrec::{convert_str, ConvertConfig};
//!
//! let xml = "<root><items><item>a</item><item>b</item></items><id>7</id></root>";
//! let config = ConvertConfig::split(["item"]).with_donors(["id"]);
//! let out = convert_str(xml, &config).unwrap();
//! assert_eq!(
//!     out,
//!     "{\"item\":\"a\",\"root_id\":\"7\"}\n{\"item\":\"b\",\"root_id\":\"7\"}\n"
//! );
//! ```
//!
//! ## Streaming a file
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::io::{self, BufWriter};
//! use xmlrec::{convert_reader, ConvertConfig};
//!
//! let file = File::open("artists.xml")?;
//! let stdout = BufWriter::new(io::stdout().lock());
//! let summary = convert_reader(file, stdout, &ConvertConfig::split(["artist"]))?;
//! eprintln!("{} records", summary.records);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod classify;
mod config;
pub mod donation;
pub mod emit;
mod error;
mod event;
mod reader;
pub mod registry;
mod walker;

pub use config::{ConvertConfig, Mode, UnresolvedPolicy, DEFAULT_MAX_DEPTH};
pub use donation::{DonationBroker, DonorKey};
pub use emit::{Disposition, Emitter};
pub use error::{ConvertError, ConvertResult};
pub use event::XmlEvent;
pub use reader::{XmlEventReader, DEFAULT_BUFFER_SIZE};
pub use registry::{EntityType, Node, NodeId, NodeRegistry, SchemaEntry};
pub use walker::{StreamSummary, TreeWalker};

use std::io::{Read, Write};

/// Convert an XML byte stream, writing records to `output`.
///
/// # Errors
///
/// Returns the first error raised by the tokenizer, the walker or the writer.
pub fn convert_reader<R, W>(
    input: R,
    output: W,
    config: &ConvertConfig,
) -> ConvertResult<StreamSummary>
where
    R: Read,
    W: Write,
{
    let mut walker = TreeWalker::new(config, output);
    walker.run(XmlEventReader::from_read(input))
}

/// Convert an in-memory XML document and return the records as a string.
///
/// # Errors
///
/// Same as [`convert_reader`].
pub fn convert_str(xml: &str, config: &ConvertConfig) -> ConvertResult<String> {
    let mut walker = TreeWalker::new(config, Vec::new());
    walker.run(XmlEventReader::from_str(xml))?;
    Ok(String::from_utf8_lossy(&walker.into_writer()).into_owned())
}
