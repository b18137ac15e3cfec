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

//! Record emission
//!
//! [`disposition`] decides what happens to a value composed at a closure;
//! [`Emitter`] serializes records as one JSON object per line.

use crate::config::{ConvertConfig, Mode};
use crate::donation::DonorKey;
use crate::error::ConvertResult;
use crate::registry::Node;
use serde_json::{Map, Value};
use std::io::Write;

/// What to do with a freshly composed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Leave it in the node for the parent to compose.
    Keep,
    /// Write it now.
    Emit,
    /// Hold it until a donor key arrives.
    Defer,
}

/// Decide the disposition of a value just composed for `node`.
pub fn disposition(config: &ConvertConfig, node: &Node) -> Disposition {
    match &config.mode {
        Mode::Full => {
            if node.parent().is_none() {
                Disposition::Emit
            } else {
                Disposition::Keep
            }
        }
        Mode::Split { targets, donors } => {
            if !targets.contains(node.name()) {
                Disposition::Keep
            } else if donors.is_empty() || node.is_key_donor() || node.donor_key().is_some() {
                Disposition::Emit
            } else {
                Disposition::Defer
            }
        }
    }
}

/// Writes records as newline-delimited JSON.
pub struct Emitter<W: Write> {
    writer: W,
    records: usize,
}

impl<W: Write> Emitter<W> {
    /// Create an emitter writing to `writer`.
    pub fn new(writer: W) -> Self {
        Emitter { writer, records: 0 }
    }

    /// Write `{name: value}`, with the donor key as a second member if present.
    pub fn write_record(
        &mut self,
        name: &str,
        value: Value,
        key: Option<&DonorKey>,
    ) -> ConvertResult<()> {
        let mut record = Map::with_capacity(2);
        record.insert(name.to_string(), value);
        if let Some(key) = key {
            record.insert(key.name.clone(), key.value.clone());
        }

        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.records += 1;
        Ok(())
    }

    /// Records written so far.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> ConvertResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Consume the emitter and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::NodeRegistry;
    use serde_json::json;

    #[test]
    fn test_write_record_plain() {
        let mut emitter = Emitter::new(Vec::new());
        emitter
            .write_record("r", json!({"x": "1", "y": "2"}), None)
            .unwrap();
        assert_eq!(emitter.records(), 1);
        assert_eq!(
            String::from_utf8(emitter.into_inner()).unwrap(),
            "{\"r\":{\"x\":\"1\",\"y\":\"2\"}}\n"
        );
    }

    #[test]
    fn test_write_record_with_key() {
        let mut emitter = Emitter::new(Vec::new());
        let key = DonorKey::new("root", "id", json!("7"));
        emitter.write_record("item", json!("a"), Some(&key)).unwrap();
        emitter.write_record("item", Value::Null, Some(&key)).unwrap();
        assert_eq!(
            String::from_utf8(emitter.into_inner()).unwrap(),
            "{\"item\":\"a\",\"root_id\":\"7\"}\n{\"item\":null,\"root_id\":\"7\"}\n"
        );
    }

    #[test]
    fn test_full_mode_emits_only_top_level() {
        let mut registry = NodeRegistry::new();
        let (root, _) = registry.resolve(None, "root".to_string(), false);
        let (child, _) = registry.resolve(Some(root), "child".to_string(), false);
        let config = ConvertConfig::full();
        assert_eq!(disposition(&config, registry.get(root)), Disposition::Emit);
        assert_eq!(disposition(&config, registry.get(child)), Disposition::Keep);
    }

    #[test]
    fn test_split_mode_targets() {
        let mut registry = NodeRegistry::new();
        let (root, _) = registry.resolve(None, "root".to_string(), false);
        let (item, _) = registry.resolve(Some(root), "item".to_string(), false);
        let config = ConvertConfig::split(["item"]);
        assert_eq!(disposition(&config, registry.get(root)), Disposition::Keep);
        assert_eq!(disposition(&config, registry.get(item)), Disposition::Emit);
    }

    #[test]
    fn test_split_mode_waits_for_key() {
        let mut registry = NodeRegistry::new();
        let (root, _) = registry.resolve(None, "root".to_string(), false);
        let (item, _) = registry.resolve(Some(root), "item".to_string(), false);
        let (id, _) = registry.resolve(Some(root), "id".to_string(), true);
        let config = ConvertConfig::split(["item", "id"]).with_donors(["id"]);

        assert_eq!(disposition(&config, registry.get(item)), Disposition::Defer);
        assert_eq!(disposition(&config, registry.get(id)), Disposition::Emit);

        registry.get_mut(item).donor_key = Some(DonorKey::new("root", "id", json!("7")));
        assert_eq!(disposition(&config, registry.get(item)), Disposition::Emit);
    }
}
