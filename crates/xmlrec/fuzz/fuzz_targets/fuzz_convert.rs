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

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::{self, Cursor};
use xmlrec::{convert_reader, ConvertConfig, UnresolvedPolicy};

/// Fuzz target for the converter.
///
/// Arbitrary bytes go through the tokenizer and the tree walker in both
/// modes. The converter must return `Ok` or `Err`, never panic, and stay
/// within the configured nesting depth.
///
/// # Running the Fuzzer
///
/// ```bash
/// cd crates/xmlrec
/// cargo fuzz run fuzz_convert -- -max_len=65536
/// ```
fuzz_target!(|data: &[u8]| {
    let full = ConvertConfig::full().with_max_depth(256);
    let _ = convert_reader(Cursor::new(data), io::sink(), &full);

    let split = ConvertConfig::split(["a", "b", "item"])
        .with_donors(["id"])
        .with_object_tags(["o"])
        .with_max_depth(256)
        .with_unresolved(UnresolvedPolicy::Emit);
    let _ = convert_reader(Cursor::new(data), io::sink(), &split);
});
