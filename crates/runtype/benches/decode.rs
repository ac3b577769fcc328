// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decode Benchmark
//!
//! Measures type-encoding decoding, including host lookups for object
//! encodings.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use runtype::{Availability, Catalog, EncodingDecoder};

const ENCODINGS: &[&str] = &[
    "q",
    "d",
    ":",
    "{CGRect={CGPoint=dd}{CGSize=dd}}",
    "^{CGColor=}",
    "@\"UIView\"",
    "@\"<UITableViewDelegate>\"",
];

fn bench_decode(c: &mut Criterion) {
    let catalog = Catalog::with_foundation();
    let decoder = EncodingDecoder::default();

    let mut group = c.benchmark_group("decode");
    for encoding in ENCODINGS {
        group.bench_function(*encoding, |b| {
            b.iter(|| decoder.decode(black_box(encoding), Availability::Available, &catalog))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
