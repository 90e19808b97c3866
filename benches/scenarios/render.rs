//! Full buffers through the render engine, from idle to a busy keyboard.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keysynth::{
    dsp::oscillator::{note_to_frequency, Waveform},
    io::samples::SampleLibrary,
    KeySynth, SynthConfig,
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

const CHANNELS: usize = 2;

/// A synth with `voices` held notes and the given filter cycle counts.
fn busy_synth(voices: i32, low_pass_steps: usize, rhythm: bool) -> KeySynth {
    let synth = KeySynth::new(&SynthConfig::default(), SampleLibrary::empty());
    for degree in 0..voices {
        let waveform = Waveform::ALL[degree as usize % Waveform::ALL.len()];
        synth.notes().press(note_to_frequency(2, degree), waveform);
    }
    for _ in 0..low_pass_steps {
        synth.state().cycle_low_pass();
    }
    if rhythm {
        synth.state().toggle_rhythm();
    }
    synth.state().toggle_master_filter();
    synth
}

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");

    let cases: [(&str, i32, usize, bool); 4] = [
        ("idle", 0, 0, false),
        ("chord_4", 4, 2, false),
        ("chord_8_rhythm", 8, 2, true),
        ("chord_8_lfo", 8, 4, true),
    ];

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size * CHANNELS];

        for (name, voices, steps, rhythm) in cases {
            let synth = busy_synth(voices, steps, rhythm);
            let mut engine = synth.engine(SAMPLE_RATE);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    black_box(engine.render_buffer(black_box(&mut buffer), CHANNELS));
                })
            });
        }
    }

    group.finish();
}
