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

//! Convert command - XML to newline-delimited JSON records

use super::open_input;
use crate::error::CliError;
use std::io::{self, BufWriter};
use tracing::info;
use xmlrec::{convert_reader, ConvertConfig};

/// Stream `file` through the converter, writing records to stdout.
///
/// Records already written stay on stdout when a later error aborts the run.
///
/// # Examples
///
/// ```no_run
/// use xmlrec::ConvertConfig;
/// use xmlrec_cli::commands::convert;
///
/// # fn main() -> Result<(), xmlrec_cli::error::CliError> {
/// let config = ConvertConfig::split(["order"]).with_donors(["id"]);
/// convert("orders.xml", &config)?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns `Err` if the file cannot be opened or the conversion fails.
pub fn convert(file: &str, config: &ConvertConfig) -> Result<(), CliError> {
    let input = open_input(file)?;
    let stdout = io::stdout();
    let output = BufWriter::new(stdout.lock());

    let summary = convert_reader(input, output, config)?;
    info!(
        file,
        events = summary.events,
        records = summary.records,
        unresolved = summary.unresolved,
        schema_positions = summary.schema_positions,
        "conversion finished"
    );
    Ok(())
}
