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

//! xmlrec Command Line Interface

use clap::Parser;
use std::process::ExitCode;
use xmlrec_cli::cli::Commands;

/// xmlrec - Streaming XML to newline-delimited JSON records
///
/// # Examples
///
/// ```bash
/// # Whole document as one record
/// xmlrec full catalog.xml
///
/// # One record per <order>, keyed by the order list's <id>
/// xmlrec split orders.xml --target order --donor id
///
/// # Inspect the inferred schema
/// xmlrec schema orders.xml
/// ```
#[derive(Parser)]
#[command(name = "xmlrec")]
#[command(author, version, about = "xmlrec - Streaming XML to newline-delimited JSON records", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    xmlrec_cli::init_logging(cli.verbose);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
