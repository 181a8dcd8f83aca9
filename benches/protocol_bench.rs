//! Benchmarks for filekv protocol operations

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use filekv::protocol::{encode_response, parse_command, Response};

fn protocol_benchmarks(c: &mut Criterion) {
    c.bench_function("parse_set", |b| {
        b.iter(|| parse_command(black_box(b"SET benchkey benchvalue\n")))
    });

    c.bench_function("parse_get", |b| {
        b.iter(|| parse_command(black_box(b"GET benchkey\n")))
    });

    c.bench_function("parse_invalid", |b| {
        b.iter(|| parse_command(black_box(b"HELLO world\n")))
    });

    c.bench_function("encode_get_reply", |b| {
        let response = Response::Value(b"benchvalue".to_vec());
        b.iter(|| encode_response(black_box(&response)))
    });
}

criterion_group!(benches, protocol_benchmarks);
criterion_main!(benches);
