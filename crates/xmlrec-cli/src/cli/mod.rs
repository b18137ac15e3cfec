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

//! CLI command definitions and argument parsing.
//!
//! Three commands share one set of engine options:
//!
//! ```text
//! Commands
//! ├── full    whole document as a single record
//! ├── split   one record per target element, with optional key donors
//! └── schema  tree of schema positions and their entity types
//! ```

use crate::commands;
use crate::error::CliError;
use clap::{Args, Subcommand};
use xmlrec::{ConvertConfig, UnresolvedPolicy, DEFAULT_MAX_DEPTH};

/// Options shared by every command that runs the converter.
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Element names that always compose as objects (comma-separated or repeated)
    #[arg(long = "object", value_name = "TAG", value_delimiter = ',')]
    pub object: Vec<String>,

    /// Maximum element nesting depth
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Write records whose donor key never arrived instead of dropping them
    #[arg(long)]
    pub emit_unresolved: bool,
}

impl EngineArgs {
    /// Apply the shared options to a base configuration.
    pub fn apply(&self, config: ConvertConfig) -> ConvertConfig {
        let policy = if self.emit_unresolved {
            UnresolvedPolicy::Emit
        } else {
            UnresolvedPolicy::Warn
        };
        config
            .with_object_tags(self.object.iter().cloned())
            .with_max_depth(self.max_depth)
            .with_unresolved(policy)
    }
}

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use xmlrec_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a whole document into one JSON record
    ///
    /// Writes a single line `{"<root>": value}` to stdout once the top-level
    /// element closes.
    Full {
        /// Input XML file
        #[arg(value_name = "FILE")]
        file: String,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Emit one JSON record per target element
    ///
    /// Every closed element named by `--target` is written as its own line.
    /// Values of `--donor` elements are attached to their sibling records as
    /// a `<parent>_<donor>` member.
    Split {
        /// Input XML file
        #[arg(value_name = "FILE")]
        file: String,

        /// Element names to emit (comma-separated or repeated)
        #[arg(short, long = "target", value_name = "TAG", value_delimiter = ',', required = true)]
        targets: Vec<String>,

        /// Leaf element names whose values become foreign keys
        #[arg(short, long = "donor", value_name = "TAG", value_delimiter = ',')]
        donors: Vec<String>,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Print the inferred schema tree
    ///
    /// Streams the document without writing records and lists every distinct
    /// element path with the entity type decided at its last closure.
    Schema {
        /// Input XML file
        #[arg(value_name = "FILE")]
        file: String,

        /// Mark these element names as key donors in the listing
        #[arg(short, long = "donor", value_name = "TAG", value_delimiter = ',')]
        donors: Vec<String>,

        #[command(flatten)]
        engine: EngineArgs,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the input cannot be opened, the document is malformed
    /// or violates the inferred schema, or writing to stdout fails.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Full { file, engine } => {
                let config = engine.apply(ConvertConfig::full());
                commands::convert(&file, &config)
            }
            Commands::Split {
                file,
                targets,
                donors,
                engine,
            } => {
                let config = engine.apply(ConvertConfig::split(targets).with_donors(donors));
                commands::convert(&file, &config)
            }
            Commands::Schema {
                file,
                donors,
                engine,
            } => {
                let config = engine.apply(
                    ConvertConfig::split(std::iter::empty::<String>()).with_donors(donors),
                );
                commands::schema(&file, &config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use xmlrec::Mode;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    fn parse(args: &[&str]) -> Commands {
        let mut full = vec!["xmlrec"];
        full.extend_from_slice(args);
        TestCli::try_parse_from(full).unwrap().command
    }

    #[test]
    fn test_split_accepts_comma_lists() {
        match parse(&["split", "in.xml", "-t", "a,b", "--donor", "id", "-d", "code"]) {
            Commands::Split { targets, donors, .. } => {
                assert_eq!(targets, vec!["a", "b"]);
                assert_eq!(donors, vec!["id", "code"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_split_requires_target() {
        assert!(TestCli::try_parse_from(["xmlrec", "split", "in.xml"]).is_err());
    }

    #[test]
    fn test_engine_defaults() {
        match parse(&["full", "in.xml"]) {
            Commands::Full { engine, .. } => {
                assert!(engine.object.is_empty());
                assert_eq!(engine.max_depth, DEFAULT_MAX_DEPTH);
                assert!(!engine.emit_unresolved);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_engine_apply() {
        let engine = EngineArgs {
            object: vec!["o".to_string()],
            max_depth: 8,
            emit_unresolved: true,
        };
        let config = engine.apply(ConvertConfig::split(["r"]).with_donors(["id"]));
        assert!(config.is_forced_object("o"));
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.unresolved, UnresolvedPolicy::Emit);
        assert!(matches!(config.mode, Mode::Split { .. }));
        assert!(config.is_donor("id"));
    }
}
