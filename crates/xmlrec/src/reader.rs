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

//! quick-xml backed event source
//!
//! [`XmlEventReader`] turns a byte stream into [`XmlEvent`]s without building
//! any tree. Only tags and text are reported; attributes, comments,
//! processing instructions and the document prolog are skipped.
//!
//! The text delivered with a close event is the element's leading text: the
//! characters between its start tag and its first child (or its end tag).
//! Text that follows a child element is not attributed to the parent.

use crate::error::{ConvertError, ConvertResult};
use crate::event::XmlEvent;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{BufRead, BufReader, Read};

/// Buffer size for reading chunks (64KB)
pub const DEFAULT_BUFFER_SIZE: usize = 65536;

#[derive(Debug)]
struct OpenElement {
    name: String,
    text: String,
    has_child: bool,
}

/// Streaming XML tokenizer yielding open/close events.
///
/// ```rust
/// use xmlrec::{XmlEvent, XmlEventReader};
///
/// let events: Vec<_> = XmlEventReader::from_str("<a><b>1</b></a>")
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(
///     events,
///     vec![
///         XmlEvent::open("a"),
///         XmlEvent::open("b"),
///         XmlEvent::close("b", Some("1")),
///         XmlEvent::close("a", None),
///     ]
/// );
/// ```
pub struct XmlEventReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    stack: Vec<OpenElement>,
    pending: Option<XmlEvent>,
    exhausted: bool,
}

impl<R: BufRead> XmlEventReader<R> {
    /// Create an event reader over buffered input.
    pub fn new(input: R) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.expand_empty_elements(true);
        reader.trim_text(false);
        XmlEventReader {
            reader,
            buf: Vec::with_capacity(8192),
            stack: Vec::new(),
            pending: None,
            exhausted: false,
        }
    }

    /// Current byte offset in the input.
    pub fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    /// Number of elements currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn next_event(&mut self) -> ConvertResult<Option<XmlEvent>> {
        if let Some(event) = self.pending.take() {
            return Ok(Some(event));
        }

        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(e)) => {
                    let name = decode_name(e.name().as_ref());
                    if let Some(parent) = self.stack.last_mut() {
                        parent.has_child = true;
                    }
                    self.stack.push(OpenElement {
                        name: name.clone(),
                        text: String::new(),
                        has_child: false,
                    });
                    return Ok(Some(XmlEvent::Open { name }));
                }
                Ok(Event::Empty(e)) => {
                    // Only reachable with empty-element expansion turned off.
                    let name = decode_name(e.name().as_ref());
                    if let Some(parent) = self.stack.last_mut() {
                        parent.has_child = true;
                    }
                    self.pending = Some(XmlEvent::Close {
                        name: name.clone(),
                        text: None,
                    });
                    return Ok(Some(XmlEvent::Open { name }));
                }
                Ok(Event::Text(e)) => {
                    if let Some(top) = self.stack.last_mut().filter(|top| !top.has_child) {
                        let text = e.unescape().map_err(|err| {
                            ConvertError::malformed(
                                Some(self.reader.buffer_position() as u64),
                                format!("text unescape error: {}", err),
                            )
                        })?;
                        top.text.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(top) = self.stack.last_mut().filter(|top| !top.has_child) {
                        top.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok(Event::End(e)) => {
                    let name = decode_name(e.name().as_ref());
                    let open = self.stack.pop().ok_or_else(|| {
                        ConvertError::malformed(
                            Some(self.reader.buffer_position() as u64),
                            format!("closing tag </{}> without an open element", name),
                        )
                    })?;
                    let text = (!open.text.trim().is_empty()).then_some(open.text);
                    return Ok(Some(XmlEvent::Close { name, text }));
                }
                Ok(Event::Eof) => {
                    if let Some(open) = self.stack.last() {
                        return Err(ConvertError::malformed(
                            Some(self.reader.buffer_position() as u64),
                            format!(
                                "unexpected end of document, <{}> and {} enclosing element(s) still open",
                                open.name,
                                self.depth() - 1
                            ),
                        ));
                    }
                    return Ok(None);
                }
                Err(e) => {
                    return Err(ConvertError::malformed(
                        Some(self.reader.buffer_position() as u64),
                        e.to_string(),
                    ))
                }
                _ => {}
            }
        }
    }
}

impl<R: Read> XmlEventReader<BufReader<R>> {
    /// Create an event reader over unbuffered input using a 64KB buffer.
    pub fn from_read(input: R) -> Self {
        Self::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, input))
    }
}

impl<'a> XmlEventReader<&'a [u8]> {
    /// Create an event reader over an in-memory document.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(xml: &'a str) -> Self {
        Self::new(xml.as_bytes())
    }
}

impl<R: BufRead> Iterator for XmlEventReader<R> {
    type Item = ConvertResult<XmlEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.exhausted = true;
                None
            }
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }
}

fn decode_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(xml: &str) -> Vec<XmlEvent> {
        XmlEventReader::from_str(xml)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_skips_prolog_and_comments() {
        let xml = r#"<?xml version="1.0"?><!-- c --><root><?pi x?><a>1</a></root>"#;
        assert_eq!(
            events(xml),
            vec![
                XmlEvent::open("root"),
                XmlEvent::open("a"),
                XmlEvent::close("a", Some("1")),
                XmlEvent::close("root", None),
            ]
        );
    }

    #[test]
    fn test_self_closing_element() {
        assert_eq!(
            events("<root><empty/></root>"),
            vec![
                XmlEvent::open("root"),
                XmlEvent::open("empty"),
                XmlEvent::close("empty", None),
                XmlEvent::close("root", None),
            ]
        );
    }

    #[test]
    fn test_whitespace_text_is_absent() {
        let xml = "<root>\n  <a>  </a>\n</root>";
        assert_eq!(
            events(xml),
            vec![
                XmlEvent::open("root"),
                XmlEvent::open("a"),
                XmlEvent::close("a", None),
                XmlEvent::close("root", None),
            ]
        );
    }

    #[test]
    fn test_leading_text_only() {
        let xml = "<p>head<b>bold</b>tail</p>";
        assert_eq!(
            events(xml),
            vec![
                XmlEvent::open("p"),
                XmlEvent::open("b"),
                XmlEvent::close("b", Some("bold")),
                XmlEvent::close("p", Some("head")),
            ]
        );
    }

    #[test]
    fn test_entities_and_cdata() {
        let xml = "<a>x &amp; y<![CDATA[ <z> ]]></a>";
        assert_eq!(
            events(xml),
            vec![XmlEvent::open("a"), XmlEvent::close("a", Some("x & y <z> "))]
        );
    }

    #[test]
    fn test_attributes_ignored() {
        assert_eq!(
            events(r#"<a id="1" kind="x">t</a>"#),
            vec![XmlEvent::open("a"), XmlEvent::close("a", Some("t"))]
        );
    }

    #[test]
    fn test_mismatched_end_tag_is_error() {
        let result: Result<Vec<_>, _> = XmlEventReader::from_str("<a><b></a>").collect();
        assert!(matches!(result, Err(ConvertError::MalformedInput { .. })));
    }

    #[test]
    fn test_unclosed_document_is_error() {
        let result: Result<Vec<_>, _> = XmlEventReader::from_str("<a><b>1</b>").collect();
        assert!(matches!(result, Err(ConvertError::MalformedInput { .. })));
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut reader = XmlEventReader::from_str("<a></b>");
        let mut saw_error = false;
        for event in reader.by_ref() {
            if event.is_err() {
                saw_error = true;
            }
        }
        assert!(saw_error);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_from_read() {
        let cursor = std::io::Cursor::new(b"<a>1</a>".to_vec());
        let collected: Vec<_> = XmlEventReader::from_read(cursor)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(collected.len(), 2);
    }
}
