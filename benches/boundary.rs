//! Quick performance benchmarks for the boundary layer
//!
//! Lightweight benchmarks for the buffer exchange and the format round
//! trip against the inert backend.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use reflow_wasm::abi::{reflow_format, reflow_init, reflow_result_status};
use reflow_wasm::memory::{reflow_alloc, reflow_dealloc};

fn bench_buffer_exchange(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_exchange");

    group.bench_function("alloc_dealloc_64_bytes", |b| {
        b.iter(|| unsafe {
            let ptr = reflow_alloc(black_box(64));
            reflow_dealloc(black_box(ptr));
        });
    });

    group.bench_function("alloc_dealloc_64_kib", |b| {
        b.iter(|| unsafe {
            let ptr = reflow_alloc(black_box(64 * 1024));
            reflow_dealloc(black_box(ptr));
        });
    });

    group.finish();
}

fn bench_format_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_round_trip");

    reflow_init();
    let source = b"int main() { return 0; }\n";
    let name = b"main.c";

    group.bench_function("format_short_source", |b| {
        b.iter(|| unsafe {
            let status = reflow_format(
                black_box(source.as_ptr()),
                black_box(source.len()),
                black_box(name.as_ptr()),
                black_box(name.len()),
            );
            black_box(status);
        });
    });

    group.bench_function("result_status_read", |b| {
        b.iter(|| {
            black_box(reflow_result_status());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_buffer_exchange, bench_format_round_trip);
criterion_main!(benches);
