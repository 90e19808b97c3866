//! Benchmarks for the state-variable filter and the cascaded filter bank.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keysynth::{
    config::FilterSettings,
    dsp::filter::SVFilter,
    engine::filter_bank::{FilterBank, FilterLevel},
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let settings = FilterSettings::default();

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        let mut stage = SVFilter::lowpass(880.0, SAMPLE_RATE, 2.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("single_stage", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                stage.render(black_box(&mut buffer));
            })
        });

        // Both cascades at a static level: coefficients computed once
        let mut bank = FilterBank::new(&settings, SAMPLE_RATE);
        bank.refresh(FilterLevel::Medium, FilterLevel::Medium);
        group.bench_with_input(BenchmarkId::new("cascade_static", size), &size, |b, _| {
            b.iter(|| {
                for &x in &input {
                    black_box(bank.process(x, true));
                }
            })
        });

        // LFO on both channels: every stage retuned every sample
        let mut bank = FilterBank::new(&settings, SAMPLE_RATE);
        bank.refresh(FilterLevel::Lfo, FilterLevel::Lfo);
        let mut clock = 0u64;
        group.bench_with_input(BenchmarkId::new("cascade_lfo", size), &size, |b, _| {
            b.iter(|| {
                for &x in &input {
                    bank.modulate(clock);
                    clock += 1;
                    black_box(bank.process(x, true));
                }
            })
        });
    }

    group.finish();
}
