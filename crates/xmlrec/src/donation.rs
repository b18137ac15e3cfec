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

//! Key donation between sibling branches
//!
//! A donor is a leaf whose value becomes a foreign key for the other branches
//! under its parent. When a donor closes, the key `parent_donor` is attached
//! to the parent and broadcast to every other node subscribed to the parent's
//! scope, and from there down each subscriber's own scope. Every node
//! subscribes to its parent's scope when it is first created.
//!
//! The broadcast returns the nodes it reached, in delivery order, so the
//! caller can release records that were deferred waiting for the key.

use crate::registry::{NodeId, NodeRegistry};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// A synthetic foreign key `{name: value}`.
#[derive(Debug, Clone, PartialEq)]
pub struct DonorKey {
    /// Key name, `parentName_donorName`
    pub name: String,
    /// Donor's composed value
    pub value: Value,
}

impl DonorKey {
    /// Build the key donated by `donor` under `parent`.
    pub fn new(parent: &str, donor: &str, value: Value) -> Self {
        DonorKey {
            name: format!("{}_{}", parent, donor),
            value,
        }
    }
}

/// Per-scope subscriber lists for key broadcasts.
#[derive(Debug, Default)]
pub struct DonationBroker {
    subscribers: HashMap<NodeId, Vec<NodeId>>,
}

impl DonationBroker {
    /// Create a broker with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `node` to broadcasts in `scope`.
    pub fn subscribe(&mut self, scope: NodeId, node: NodeId) {
        self.subscribers.entry(scope).or_default().push(node);
    }

    /// Nodes subscribed to `scope`, in subscription order.
    pub fn subscribers(&self, scope: NodeId) -> &[NodeId] {
        self.subscribers.get(&scope).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Donate `value` from `donor` to its parent's scope.
    ///
    /// Sets the key and the donating flag on the parent and delivers the key
    /// to every subscriber of the parent except the donor, depth first.
    /// Returns the reached nodes in delivery order. A donor without a parent
    /// donates nothing.
    pub fn donate(
        &self,
        registry: &mut NodeRegistry,
        donor: NodeId,
        value: Value,
    ) -> Vec<NodeId> {
        let Some(parent) = registry.get(donor).parent() else {
            return Vec::new();
        };

        let key = DonorKey::new(registry.get(parent).name(), registry.get(donor).name(), value);
        debug!(key = %key.name, value = %key.value, "donating key");

        let scope = registry.get_mut(parent);
        scope.donor_key = Some(key.clone());
        scope.parent_is_donating = true;

        let mut reached = Vec::new();
        for &sibling in self.subscribers(parent) {
            if sibling != donor {
                self.deliver(registry, sibling, &key, &mut reached);
            }
        }
        reached
    }

    fn deliver(
        &self,
        registry: &mut NodeRegistry,
        node: NodeId,
        key: &DonorKey,
        reached: &mut Vec<NodeId>,
    ) {
        registry.get_mut(node).donor_key = Some(key.clone());
        reached.push(node);
        for &child in self.subscribers(node) {
            self.deliver(registry, child, key, reached);
        }
    }

    /// Every node in `scope`'s subtree, depth first, excluding `scope` itself.
    pub fn scope_members(&self, scope: NodeId) -> Vec<NodeId> {
        let mut members = Vec::new();
        let mut stack: Vec<NodeId> = self.subscribers(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            members.push(id);
            stack.extend(self.subscribers(id).iter().rev().copied());
        }
        members
    }
}
