//! Benchmarks for breakpoint envelopes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keysynth::dsp::envelope::envelope_points;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let two = [(0.0, 0.0), (0.1, 1.0)];
    let four = [(0.0, 0.0), (0.1, 1.0), (1.9, 1.0), (2.0, 0.0)];

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("intro_2pt", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    *out = envelope_points(i as f32 / SAMPLE_RATE, black_box(&two));
                }
            })
        });

        // Sample-note shape, evaluated near the end so every segment is scanned
        group.bench_with_input(BenchmarkId::new("sample_4pt", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    *out = envelope_points(1.95 + i as f32 / SAMPLE_RATE, black_box(&four));
                }
            })
        });
    }

    group.finish();
}
