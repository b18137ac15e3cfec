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

//! Node registry keyed by schema position
//!
//! A schema position is the root-to-element path of tag names. The registry
//! keeps exactly one [`Node`] per position ever seen, in an arena, so memory
//! grows with the shape of the document rather than with its length. Parent
//! and child links are [`NodeId`] indices into the arena; the registry owns
//! every node.

use crate::donation::DonorKey;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Stable handle to a node in a [`NodeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of the node.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Shape of a node's composed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityType {
    /// Scalar text or `null`
    #[default]
    Pair,
    /// Ordered list of one-key mappings
    Array,
    /// Mapping from child names to values
    Object,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityType::Pair => "pair",
            EntityType::Array => "array",
            EntityType::Object => "object",
        };
        f.write_str(s)
    }
}

/// A composed value waiting for a donor key.
#[derive(Debug, Clone)]
pub(crate) struct Deferred {
    /// Walker event count when the value was deferred
    pub(crate) seq: u64,
    pub(crate) value: Value,
}

/// State of one schema position.
#[derive(Debug)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) values: Vec<Value>,
    pub(crate) text: Option<String>,
    pub(crate) entity_type: EntityType,
    pub(crate) donor_key: Option<DonorKey>,
    pub(crate) is_key_donor: bool,
    pub(crate) parent_is_donating: bool,
    /// Walker event count at the open of the current occurrence
    pub(crate) opened_at: u64,
    pub(crate) held: Vec<Deferred>,
}

impl Node {
    fn new(name: String, parent: Option<NodeId>, is_key_donor: bool) -> Self {
        Node {
            name,
            parent,
            children: Vec::new(),
            values: Vec::new(),
            text: None,
            entity_type: EntityType::default(),
            donor_key: None,
            is_key_donor,
            parent_is_donating: false,
            opened_at: 0,
            held: Vec::new(),
        }
    }

    /// Tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent node, `None` for a top-level element.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in first-seen document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Values accumulated since the last reset.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Shape decided at the most recent closure.
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Foreign key currently attached to this node.
    pub fn donor_key(&self) -> Option<&DonorKey> {
        self.donor_key.as_ref()
    }

    /// Whether this node donates its value as a foreign key.
    pub fn is_key_donor(&self) -> bool {
        self.is_key_donor
    }

    /// Whether one of this node's children has donated a key.
    pub fn parent_is_donating(&self) -> bool {
        self.parent_is_donating
    }
}

/// One line of a schema listing produced by [`NodeRegistry::schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    /// Nesting depth, 0 for top-level elements
    pub depth: usize,
    /// Tag name
    pub name: String,
    /// Shape decided at the last closure
    pub entity_type: EntityType,
    /// Whether the node is a key donor
    pub donor: bool,
}

/// Arena of nodes with a lookup table from schema position to node.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
    index: HashMap<(Option<NodeId>, String), NodeId>,
    roots: Vec<NodeId>,
}

impl NodeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct schema positions seen so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no element has been seen.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Top-level nodes in first-seen order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Find or create the node for `name` under `parent`.
    ///
    /// Returns the node and whether it was created by this call.
    pub fn resolve(
        &mut self,
        parent: Option<NodeId>,
        name: String,
        is_key_donor: bool,
    ) -> (NodeId, bool) {
        let key = (parent, name);
        if let Some(&id) = self.index.get(&key) {
            return (id, false);
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(key.1.clone(), parent, is_key_donor));
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        self.index.insert(key, id);
        (id, true)
    }

    /// Look up a node by its full path of tag names.
    pub fn lookup(&self, path: &[&str]) -> Option<NodeId> {
        let mut current = None;
        for name in path {
            let id = *self.index.get(&(current, (*name).to_string()))?;
            current = Some(id);
        }
        current
    }

    /// Tag names from the top-level element down to `id`.
    pub fn path(&self, id: NodeId) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id);
            path.push(node.name.as_str());
            current = node.parent;
        }
        path.reverse();
        path
    }

    /// Every node in depth-first, first-seen order.
    pub fn schema(&self) -> Vec<SchemaEntry> {
        let mut entries = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, usize)> =
            self.roots.iter().rev().map(|&id| (id, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            let node = self.get(id);
            entries.push(SchemaEntry {
                depth,
                name: node.name.clone(),
                entity_type: node.entity_type,
                donor: node.is_key_donor,
            });
            stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
        }
        entries
    }

    /// Nodes still holding deferred values.
    pub fn nodes_with_held(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|&id| !self.get(id).held.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_creates_once() {
        let mut registry = NodeRegistry::new();
        let (root, created) = registry.resolve(None, "root".to_string(), false);
        assert!(created);
        let (again, created) = registry.resolve(None, "root".to_string(), false);
        assert!(!created);
        assert_eq!(root, again);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_same_name_different_parent_is_distinct() {
        let mut registry = NodeRegistry::new();
        let (root, _) = registry.resolve(None, "root".to_string(), false);
        let (a, _) = registry.resolve(Some(root), "a".to_string(), false);
        let (name_under_root, _) = registry.resolve(Some(root), "name".to_string(), false);
        let (name_under_a, _) = registry.resolve(Some(a), "name".to_string(), false);
        assert_ne!(name_under_root, name_under_a);
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.path(name_under_a), vec!["root", "a", "name"]);
    }

    #[test]
    fn test_children_in_first_seen_order() {
        let mut registry = NodeRegistry::new();
        let (root, _) = registry.resolve(None, "root".to_string(), false);
        let (y, _) = registry.resolve(Some(root), "y".to_string(), false);
        let (x, _) = registry.resolve(Some(root), "x".to_string(), false);
        registry.resolve(Some(root), "y".to_string(), false);
        assert_eq!(registry.get(root).children(), &[y, x]);
        assert_eq!(registry.get(x).parent(), Some(root));
        assert_eq!(registry.roots(), &[root]);
    }

    #[test]
    fn test_lookup_by_path() {
        let mut registry = NodeRegistry::new();
        let (root, _) = registry.resolve(None, "root".to_string(), false);
        let (items, _) = registry.resolve(Some(root), "items".to_string(), false);
        let (item, _) = registry.resolve(Some(items), "item".to_string(), false);
        assert_eq!(registry.lookup(&["root", "items", "item"]), Some(item));
        assert_eq!(registry.lookup(&["root", "item"]), None);
        assert_eq!(registry.lookup(&[]), None);
    }

    #[test]
    fn test_schema_depth_first() {
        let mut registry = NodeRegistry::new();
        let (root, _) = registry.resolve(None, "root".to_string(), false);
        let (a, _) = registry.resolve(Some(root), "a".to_string(), false);
        registry.resolve(Some(root), "b".to_string(), true);
        registry.resolve(Some(a), "c".to_string(), false);

        let names: Vec<_> = registry
            .schema()
            .into_iter()
            .map(|e| (e.depth, e.name, e.donor))
            .collect();
        assert_eq!(
            names,
            vec![
                (0, "root".to_string(), false),
                (1, "a".to_string(), false),
                (2, "c".to_string(), false),
                (1, "b".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_entity_type_display() {
        assert_eq!(EntityType::Pair.to_string(), "pair");
        assert_eq!(EntityType::Array.to_string(), "array");
        assert_eq!(EntityType::Object.to_string(), "object");
    }
}
