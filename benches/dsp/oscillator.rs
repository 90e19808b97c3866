//! Benchmarks for waveform evaluation from absolute time.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keysynth::dsp::oscillator::{phase_at, Waveform};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for waveform in Waveform::ALL {
            group.bench_with_input(
                BenchmarkId::new(waveform.name(), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        for (i, out) in buffer.iter_mut().enumerate() {
                            let seconds = i as f32 / SAMPLE_RATE;
                            *out = waveform.render(phase_at(seconds, black_box(440.0)));
                        }
                        black_box(&buffer);
                    })
                },
            );
        }
    }

    group.finish();
}
