//! # Karaoke Encoder Benchmarks
//!
//! Measures the encode and decode pipelines and their individual stages.
//!
//! ## Benchmark Categories
//!
//! - **Pipeline**: Full encode/decode for both framings at several sizes
//! - **Stages**: Serializer, compressor and varint codec on their own
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench pipeline
//! cargo bench stages
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use karaoke_share::{compressor, serializer, varint, Encoder, Framing, LyricLine};
use std::hint::black_box;

/// A transcript shaped like a real song: a line every few seconds.
fn song(lines: usize) -> Vec<LyricLine> {
    (0..lines)
        .map(|i| {
            let ms = i as u64 * 3_250 + (i as u64 % 7) * 113;
            LyricLine::from_millis(format!("line {i} of the chorus, sing it loud | again"), ms)
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for size in [10, 60, 300] {
        let lines = song(size);
        for framing in [Framing::LengthPrefixed, Framing::Delimited] {
            let encoder = Encoder::new(framing);
            let token = encoder.encode("dQw4w9WgXcQ", &lines).expect("encode");

            group.bench_with_input(
                BenchmarkId::new(format!("encode_{framing:?}"), size),
                &lines,
                |b, lines| b.iter(|| encoder.encode(black_box("dQw4w9WgXcQ"), black_box(lines))),
            );
            group.bench_with_input(
                BenchmarkId::new(format!("decode_{framing:?}"), size),
                &token,
                |b, token| b.iter(|| karaoke_share::decode(black_box(token))),
            );
        }
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let lines = song(60);
    let canonical = serializer::serialize("dQw4w9WgXcQ", &lines, Framing::LengthPrefixed).expect("serialize");
    let compressed = compressor::compress(canonical.as_bytes()).expect("compress");

    group.bench_function("serialize", |b| {
        b.iter(|| serializer::serialize(black_box("dQw4w9WgXcQ"), black_box(&lines), Framing::LengthPrefixed))
    });
    group.bench_function("deserialize", |b| b.iter(|| serializer::deserialize(black_box(&canonical))));
    group.bench_function("compress", |b| b.iter(|| compressor::compress(black_box(canonical.as_bytes()))));
    group.bench_function("decompress", |b| b.iter(|| compressor::decompress(black_box(&compressed))));
    group.bench_function("varint_round_trip", |b| {
        b.iter(|| {
            (0..1_000u64)
                .map(|n| varint::decode_varint(&varint::encode_varint(black_box(n * 977))).unwrap_or(0))
                .sum::<u64>()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_stages);
criterion_main!(benches);
