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

//! Run configuration for a conversion
//!
//! A [`ConvertConfig`] is built once, before the first event is read, and is
//! shared by reference with the tree walker and the emitter for the whole run.

use std::collections::BTreeSet;

/// Default maximum element nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Which elements are written out as records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// The whole document becomes one record, written when the top element closes.
    Full,
    /// Every closed element whose name is a target is written as its own record.
    Split {
        /// Element names emitted individually
        targets: BTreeSet<String>,
        /// Leaf element names whose value is donated as a foreign key to siblings
        donors: BTreeSet<String>,
    },
}

/// What happens to a deferred record whose donor key can no longer arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedPolicy {
    /// Log a warning and drop the record.
    #[default]
    Warn,
    /// Log a warning and write the record without a key.
    Emit,
}

/// Configuration for converting an XML event stream into records.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Emission mode
    pub mode: Mode,
    /// Element names that always compose as objects when they have children
    pub object_tags: BTreeSet<String>,
    /// Maximum element nesting depth (default: 1024)
    pub max_depth: usize,
    /// Handling of deferred records that never receive their key
    pub unresolved: UnresolvedPolicy,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::full()
    }
}

impl ConvertConfig {
    /// Full-document mode.
    pub fn full() -> Self {
        Self {
            mode: Mode::Full,
            object_tags: BTreeSet::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            unresolved: UnresolvedPolicy::default(),
        }
    }

    /// Split mode emitting `targets`, with no donors.
    pub fn split<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode: Mode::Split {
                targets: targets.into_iter().map(Into::into).collect(),
                donors: BTreeSet::new(),
            },
            ..Self::full()
        }
    }

    /// Set the donor tags. Has no effect in full mode.
    pub fn with_donors<I, S>(mut self, donors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Mode::Split { donors: ref mut d, .. } = self.mode {
            *d = donors.into_iter().map(Into::into).collect();
        }
        self
    }

    /// Force the given tags into object shape.
    pub fn with_object_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.object_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the unresolved-record policy.
    pub fn with_unresolved(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved = policy;
        self
    }

    /// Returns `true` if `name` is emitted as its own record in split mode.
    pub fn is_target(&self, name: &str) -> bool {
        match &self.mode {
            Mode::Full => false,
            Mode::Split { targets, .. } => targets.contains(name),
        }
    }

    /// Returns `true` if `name` donates its value as a foreign key.
    pub fn is_donor(&self, name: &str) -> bool {
        match &self.mode {
            Mode::Full => false,
            Mode::Split { donors, .. } => donors.contains(name),
        }
    }

    /// Key donation is active only in split mode with at least one donor.
    pub fn donation_enabled(&self) -> bool {
        matches!(&self.mode, Mode::Split { donors, .. } if !donors.is_empty())
    }

    /// Returns `true` if `name` is forced into object shape.
    pub fn is_forced_object(&self, name: &str) -> bool {
        self.object_tags.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_full() {
        let config = ConvertConfig::default();
        assert_eq!(config.mode, Mode::Full);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.unresolved, UnresolvedPolicy::Warn);
        assert!(config.object_tags.is_empty());
        assert!(!config.donation_enabled());
    }

    #[test]
    fn test_split_targets_and_donors() {
        let config = ConvertConfig::split(["item", "artist"]).with_donors(["id"]);
        assert!(config.is_target("item"));
        assert!(config.is_target("artist"));
        assert!(!config.is_target("id"));
        assert!(config.is_donor("id"));
        assert!(config.donation_enabled());
    }

    #[test]
    fn test_split_without_donors() {
        let config = ConvertConfig::split(["item"]);
        assert!(!config.donation_enabled());
        assert!(!config.is_donor("item"));
    }

    #[test]
    fn test_donors_ignored_in_full_mode() {
        let config = ConvertConfig::full().with_donors(["id"]);
        assert!(!config.is_donor("id"));
        assert!(!config.donation_enabled());
        assert!(!config.is_target("id"));
    }

    #[test]
    fn test_builder_options() {
        let config = ConvertConfig::full()
            .with_object_tags(["o"])
            .with_max_depth(8)
            .with_unresolved(UnresolvedPolicy::Emit);
        assert!(config.is_forced_object("o"));
        assert!(!config.is_forced_object("p"));
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.unresolved, UnresolvedPolicy::Emit);
    }
}
