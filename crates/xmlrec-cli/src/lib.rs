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

//! xmlrec CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **full**: convert a whole document into one JSON record
//! - **split**: emit one record per target element, with donor keys attached
//! - **schema**: print the inferred schema tree
//!
//! # Examples
//!
//! ```no_run
//! use xmlrec::ConvertConfig;
//! use xmlrec_cli::commands::{convert, schema};
//!
//! # fn main() -> Result<(), xmlrec_cli::error::CliError> {
//! convert("catalog.xml", &ConvertConfig::full())?;
//! schema("catalog.xml", &ConvertConfig::split(["book"]))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! Diagnostics go to stderr through `tracing`. The filter comes from
//! `RUST_LOG` when set, otherwise from the `-v` count (see [`init_logging`]).

pub mod cli;
pub mod commands;
pub mod error;

use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("xmlrec={level},xmlrec_cli={level}")
}

/// Install the stderr log subscriber.
///
/// Calling it twice is harmless; the second subscriber is ignored.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_levels() {
        assert_eq!(default_directive(0), "xmlrec=warn,xmlrec_cli=warn");
        assert_eq!(default_directive(1), "xmlrec=info,xmlrec_cli=info");
        assert_eq!(default_directive(2), "xmlrec=debug,xmlrec_cli=debug");
        assert_eq!(default_directive(9), "xmlrec=trace,xmlrec_cli=trace");
    }
}
