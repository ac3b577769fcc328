// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Cast Benchmark
//!
//! Measures the per-value cost of the coercion ladder for the descriptors a
//! layout layer hits most often: numeric widening, string description and
//! struct name matching.

#![allow(clippy::uninlined_format_args)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use runtype::{Catalog, Descriptor, Number, Primitive, StructValue, Value};

fn bench_numeric_ladder(c: &mut Criterion) {
    let cgfloat = Descriptor::of(Primitive::CGFloat);
    let int = Descriptor::of(Primitive::Int);
    let boxed = Value::Number(Number::Double(12.5));

    c.bench_function("cast_number_to_cgfloat", |b| {
        b.iter(|| cgfloat.cast(black_box(&boxed)))
    });
    c.bench_function("cast_double_to_int", |b| {
        b.iter(|| int.cast(black_box(&Value::Double(3.75))))
    });
}

fn bench_string_description(c: &mut Criterion) {
    let string = Descriptor::of(Primitive::String);
    let value = Value::CGFloat(0.333);

    c.bench_function("cast_cgfloat_to_string", |b| {
        b.iter(|| string.cast(black_box(&value)))
    });
}

fn bench_struct_match(c: &mut Criterion) {
    let catalog = Catalog::with_foundation();
    let rect = Descriptor::named("CGRect", &catalog).expect("well-known name");
    let value = Value::Struct(StructValue::new(
        "{CGRect={CGPoint=dd}{CGSize=dd}}",
        vec![0.0, 0.0, 320.0, 480.0],
    ));

    c.bench_function("matches_cgrect", |b| b.iter(|| rect.matches(black_box(&value))));
}

criterion_group!(
    benches,
    bench_numeric_ladder,
    bench_string_description,
    bench_struct_match
);
criterion_main!(benches);
