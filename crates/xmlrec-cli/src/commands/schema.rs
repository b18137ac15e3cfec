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

//! Schema command - inferred schema tree visualization

use super::open_input;
use crate::error::CliError;
use colored::Colorize;
use std::io;
use xmlrec::{ConvertConfig, EntityType, SchemaEntry, TreeWalker, XmlEventReader};

/// Stream `file` and print every schema position as an indented tree.
///
/// No records are written. Entity types are the ones decided at each
/// position's last closure.
///
/// # Errors
///
/// Returns `Err` if the file cannot be opened or the document is malformed.
pub fn schema(file: &str, config: &ConvertConfig) -> Result<(), CliError> {
    let input = open_input(file)?;
    let mut walker = TreeWalker::new(config, io::sink());
    let summary = walker.run(XmlEventReader::from_read(input))?;

    println!("{}", "Schema".bold().underline());
    println!();
    for entry in walker.registry().schema() {
        println!("{}", render_entry(&entry));
    }
    println!();
    println!(
        "{} {}",
        "Positions:".cyan(),
        summary.schema_positions.to_string().green()
    );
    Ok(())
}

fn render_entry(entry: &SchemaEntry) -> String {
    let prefix = "  ".repeat(entry.depth);
    let kind = match entry.entity_type {
        EntityType::Pair => entry.entity_type.to_string().normal(),
        EntityType::Array => entry.entity_type.to_string().magenta(),
        EntityType::Object => entry.entity_type.to_string().blue(),
    };
    let mut line = format!("{}{} ({})", prefix, entry.name.yellow(), kind);
    if entry.donor {
        line.push_str(&format!(" {}", "[donor]".green()));
    }
    line
}
