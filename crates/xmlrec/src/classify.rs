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

//! Entity classification and value composition
//!
//! At every closure a node is classified from its children, in rule order:
//!
//! 1. no children: [`EntityType::Pair`]
//! 2. exactly one distinct child, or any child holding more than one value
//!    this cycle: [`EntityType::Array`]
//! 3. otherwise: [`EntityType::Object`]
//!
//! Tags configured as object tags skip rule 2. Composition consumes the
//! children's values, which resets them for the next occurrence.

use crate::config::ConvertConfig;
use crate::error::{ConvertError, ConvertResult};
use crate::registry::{EntityType, NodeId, NodeRegistry};
use serde_json::{Map, Value};
use tracing::trace;

/// Decide the shape of `id` from its current children.
pub fn classify(registry: &NodeRegistry, id: NodeId, config: &ConvertConfig) -> EntityType {
    let node = registry.get(id);
    if node.children.is_empty() {
        return EntityType::Pair;
    }
    if config.is_forced_object(&node.name) {
        return EntityType::Object;
    }

    let repeated = node
        .children
        .iter()
        .any(|&child| registry.get(child).values.len() > 1);
    if node.children.len() == 1 || repeated {
        EntityType::Array
    } else {
        EntityType::Object
    }
}

/// Classify `id`, compose its value for this closure and clear its children.
///
/// # Errors
///
/// Returns [`ConvertError::SchemaViolation`] when an object-shaped node has a
/// child with more than one value.
pub fn compose(
    registry: &mut NodeRegistry,
    id: NodeId,
    config: &ConvertConfig,
) -> ConvertResult<Value> {
    let entity_type = classify(registry, id, config);
    let node = registry.get_mut(id);
    node.entity_type = entity_type;
    let text = node.text.take();

    if entity_type == EntityType::Pair {
        return Ok(text.map(Value::String).unwrap_or(Value::Null));
    }
    if let Some(text) = text {
        trace!(element = %node.name, text = %text.trim(), "dropping text of structured element");
    }

    let children = node.children.clone();
    if entity_type == EntityType::Array {
        Ok(Value::Array(compose_array(registry, &children)))
    } else {
        compose_object(registry, id, &children).map(Value::Object)
    }
}

fn compose_array(registry: &mut NodeRegistry, children: &[NodeId]) -> Vec<Value> {
    let mut list = Vec::new();
    for &child_id in children {
        let child = registry.get_mut(child_id);
        let values = std::mem::take(&mut child.values);
        if values.is_empty() {
            list.push(single(&child.name, Value::Null));
        } else {
            list.extend(values.into_iter().map(|v| single(&child.name, v)));
        }
    }
    list
}

fn compose_object(
    registry: &mut NodeRegistry,
    id: NodeId,
    children: &[NodeId],
) -> ConvertResult<Map<String, Value>> {
    if let Some(&repeated) = children
        .iter()
        .find(|&&child| registry.get(child).values.len() > 1)
    {
        let child = registry.get(repeated);
        return Err(ConvertError::schema_violation(
            registry.get(id).name.clone(),
            child.name.clone(),
            child.values.len(),
        ));
    }

    let mut map = Map::with_capacity(children.len());
    for &child_id in children {
        let child = registry.get_mut(child_id);
        let value = child.values.pop().unwrap_or(Value::Null);
        map.insert(child.name.clone(), value);
    }
    Ok(map)
}

fn single(name: &str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(name.to_string(), value);
    Value::Object(map)
}
