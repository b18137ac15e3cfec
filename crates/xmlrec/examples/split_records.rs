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

//! Example: splitting a catalogue into one record per artist alias
//!
//! Each alias record carries the id of the artist it belongs to, even when
//! the id element comes after the aliases in the document.

use std::io::{self, Cursor};
use xmlrec::{convert_reader, ConvertConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let xml = r#"<?xml version="1.0"?>
    <artists>
        <artist>
            <id>1</id>
            <name>Alice</name>
            <aliases><alias>A.</alias><alias>Ally</alias></aliases>
        </artist>
        <artist>
            <aliases><alias>Bobby</alias></aliases>
            <id>2</id>
            <name>Bob</name>
        </artist>
    </artists>"#;

    println!("Whole document:");
    convert_reader(Cursor::new(xml), io::stdout().lock(), &ConvertConfig::full())?;

    println!("\nOne record per alias, keyed by artist id:");
    let config = ConvertConfig::split(["alias"]).with_donors(["id"]);
    let summary = convert_reader(Cursor::new(xml), io::stdout().lock(), &config)?;
    println!("\n{} records from {} events", summary.records, summary.events);

    Ok(())
}
