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

//! Tree walker driving node lifecycles from element events
//!
//! The walker keeps the path of open nodes. An open event resolves the node
//! for the new schema position and makes it current; a close event records
//! the element's text, composes its value, hands the value to the emitter or
//! the donation broker, and moves back to the parent. All of this runs
//! synchronously inside [`TreeWalker::on_close`].

use crate::classify;
use crate::config::{ConvertConfig, UnresolvedPolicy};
use crate::donation::DonationBroker;
use crate::emit::{disposition, Disposition, Emitter};
use crate::error::{ConvertError, ConvertResult};
use crate::event::XmlEvent;
use crate::registry::{Deferred, NodeId, NodeRegistry};
use std::io::Write;
use tracing::{debug, trace, warn};

/// Counters describing a finished conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Events consumed
    pub events: u64,
    /// Records written
    pub records: usize,
    /// Deferred records that never received a donor key
    pub unresolved: usize,
    /// Distinct schema positions seen
    pub schema_positions: usize,
}

/// Consumes element events and emits records.
///
/// ```rust
/// use xmlrec::{ConvertConfig, TreeWalker};
///
/// let config = ConvertConfig::full();
/// let mut walker = TreeWalker::new(&config, Vec::new());
/// walker.on_open("a".to_string()).unwrap();
/// walker.on_close("a", Some("1".to_string())).unwrap();
/// let summary = walker.finish().unwrap();
/// assert_eq!(summary.records, 1);
/// assert_eq!(walker.into_writer(), b"{\"a\":\"1\"}\n".to_vec());
/// ```
pub struct TreeWalker<'c, W: Write> {
    config: &'c ConvertConfig,
    registry: NodeRegistry,
    broker: DonationBroker,
    emitter: Emitter<W>,
    path: Vec<NodeId>,
    events: u64,
    unresolved: usize,
}

impl<'c, W: Write> TreeWalker<'c, W> {
    /// Create a walker writing records to `writer`.
    pub fn new(config: &'c ConvertConfig, writer: W) -> Self {
        TreeWalker {
            config,
            registry: NodeRegistry::new(),
            broker: DonationBroker::new(),
            emitter: Emitter::new(writer),
            path: Vec::new(),
            events: 0,
            unresolved: 0,
        }
    }

    /// The node registry built so far.
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// The node of the innermost open element.
    pub fn current(&self) -> Option<NodeId> {
        self.path.last().copied()
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Dispatch one event.
    pub fn handle(&mut self, event: XmlEvent) -> ConvertResult<()> {
        match event {
            XmlEvent::Open { name } => self.on_open(name),
            XmlEvent::Close { name, text } => self.on_close(&name, text),
        }
    }

    /// Consume a whole event source, then [`finish`](Self::finish).
    ///
    /// Stops at the first error, whether reported by the source or raised
    /// while processing.
    pub fn run<I>(&mut self, events: I) -> ConvertResult<StreamSummary>
    where
        I: IntoIterator<Item = ConvertResult<XmlEvent>>,
    {
        for event in events {
            self.handle(event?)?;
        }
        self.finish()
    }

    /// An element was opened.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::DepthLimitExceeded`] when the element would
    /// nest deeper than the configured maximum.
    pub fn on_open(&mut self, name: String) -> ConvertResult<()> {
        self.events += 1;
        if self.path.len() >= self.config.max_depth {
            return Err(ConvertError::DepthLimitExceeded {
                max: self.config.max_depth,
            });
        }

        let parent = self.current();
        let is_donor = self.config.is_donor(&name);
        let (id, created) = self.registry.resolve(parent, name, is_donor);

        if created {
            debug!(
                path = %self.registry.path(id).join("/"),
                donor = is_donor,
                "new schema position"
            );
        }

        if let Some(parent) = parent {
            if created {
                self.broker.subscribe(parent, id);
            }
            let inherited = self.registry.get(parent).donor_key.clone();
            self.registry.get_mut(id).donor_key = inherited;
        }

        self.registry.get_mut(id).opened_at = self.events;
        self.path.push(id);
        Ok(())
    }

    /// An element was closed with its leading text.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MalformedInput`] when no element is open or the
    /// tag does not match the innermost open element, and
    /// [`ConvertError::SchemaViolation`] when composition fails.
    pub fn on_close(&mut self, name: &str, text: Option<String>) -> ConvertResult<()> {
        self.events += 1;
        let id = self.path.pop().ok_or_else(|| {
            ConvertError::malformed(
                None,
                format!("closing tag </{}> without an open element", name),
            )
        })?;

        let node = self.registry.get_mut(id);
        if node.name != name {
            return Err(ConvertError::malformed(
                None,
                format!("closing tag </{}> does not match <{}>", name, node.name),
            ));
        }
        if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
            node.text = Some(text);
        }

        self.close_node(id)
    }

    fn close_node(&mut self, id: NodeId) -> ConvertResult<()> {
        let value = classify::compose(&mut self.registry, id, self.config)?;
        trace!(
            element = %self.registry.get(id).name,
            entity_type = %self.registry.get(id).entity_type,
            "closed"
        );

        if self.config.donation_enabled() && self.registry.get(id).is_key_donor {
            let since = self
                .registry
                .get(id)
                .parent
                .map_or(0, |scope| self.registry.get(scope).opened_at);
            let reached = self.broker.donate(&mut self.registry, id, value.clone());
            for node in reached {
                self.release_held(node, since)?;
            }
        }

        let node = self.registry.get_mut(id);
        match disposition(self.config, node) {
            Disposition::Keep => node.values.push(value),
            Disposition::Emit => {
                let key = node.donor_key.take();
                self.emitter.write_record(&node.name, value, key.as_ref())?;
            }
            Disposition::Defer => {
                trace!(element = %node.name, "deferring record until a donor key arrives");
                node.held.push(Deferred {
                    seq: self.events,
                    value,
                });
            }
        }

        if self.registry.get(id).parent_is_donating {
            self.end_donating_cycle(id)?;
        }
        Ok(())
    }

    /// Emit the records `id` deferred after `since`, now that it has a key.
    ///
    /// Values deferred before the donating scope opened belong to an earlier
    /// occurrence of that scope and keep waiting.
    fn release_held(&mut self, id: NodeId, since: u64) -> ConvertResult<()> {
        let node = self.registry.get_mut(id);
        if !node.held.iter().any(|d| d.seq > since) {
            return Ok(());
        }

        let (current, stale): (Vec<_>, Vec<_>) =
            std::mem::take(&mut node.held).into_iter().partition(|d| d.seq > since);
        node.held = stale;
        let key = node.donor_key.take();
        debug!(element = %node.name, records = current.len(), "releasing deferred records");
        for deferred in current {
            self.emitter.write_record(&node.name, deferred.value, key.as_ref())?;
        }
        Ok(())
    }

    /// The donating scope `id` closed: its key expires and anything still
    /// waiting inside it can no longer be resolved.
    fn end_donating_cycle(&mut self, id: NodeId) -> ConvertResult<()> {
        self.registry.get_mut(id).donor_key = None;
        for member in self.broker.scope_members(id) {
            self.resolve_unresolved(member)?;
        }
        Ok(())
    }

    fn resolve_unresolved(&mut self, id: NodeId) -> ConvertResult<()> {
        let node = self.registry.get_mut(id);
        if node.held.is_empty() {
            return Ok(());
        }

        let held = std::mem::take(&mut node.held);
        warn!(
            element = %node.name,
            records = held.len(),
            "records never received a donor key"
        );
        self.unresolved += held.len();
        if self.config.unresolved == UnresolvedPolicy::Emit {
            for deferred in held {
                self.emitter.write_record(&node.name, deferred.value, None)?;
            }
        }
        Ok(())
    }

    /// End of stream.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MalformedInput`] if elements are still open,
    /// or an I/O error if flushing fails.
    pub fn finish(&mut self) -> ConvertResult<StreamSummary> {
        if let Some(&open) = self.path.last() {
            return Err(ConvertError::malformed(
                None,
                format!(
                    "stream ended with {} open element(s), innermost <{}>",
                    self.path.len(),
                    self.registry.get(open).name
                ),
            ));
        }

        for id in self.registry.nodes_with_held() {
            self.resolve_unresolved(id)?;
        }
        self.emitter.flush()?;

        Ok(StreamSummary {
            events: self.events,
            records: self.emitter.records(),
            unresolved: self.unresolved,
            schema_positions: self.registry.len(),
        })
    }

    /// Consume the walker and return the output writer.
    pub fn into_writer(self) -> W {
        self.emitter.into_inner()
    }
}
