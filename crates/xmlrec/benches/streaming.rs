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

//! Streaming conversion benchmarks.
//!
//! Measures full and split mode throughput over generated documents of
//! increasing record counts, with and without key donation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fmt::Write as _;
use xmlrec::{convert_reader, ConvertConfig};

const RECORD_COUNTS: [usize; 3] = [100, 1_000, 10_000];

fn generate_catalog(records: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<catalog>\n");
    for i in 0..records {
        let _ = write!(
            xml,
            "  <artist>\n    <id>{i}</id>\n    <name>Artist {i}</name>\n    \
             <aliases><alias>a{i}</alias><alias>b{i}</alias></aliases>\n  </artist>\n"
        );
    }
    xml.push_str("</catalog>\n");
    xml
}

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for &records in &RECORD_COUNTS {
        let xml = generate_catalog(records);
        group.throughput(Throughput::Bytes(xml.len() as u64));

        let configs = [
            ("full", ConvertConfig::full()),
            ("split", ConvertConfig::split(["artist"])),
            (
                "split_donor",
                ConvertConfig::split(["alias"]).with_donors(["id"]),
            ),
        ];

        for (label, config) in &configs {
            group.bench_with_input(BenchmarkId::new(*label, records), &xml, |b, xml| {
                b.iter(|| {
                    let mut out = Vec::with_capacity(xml.len());
                    convert_reader(black_box(xml.as_bytes()), &mut out, config)
                        .expect("benchmark input converts");
                    black_box(out)
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_modes);
criterion_main!(benches);
