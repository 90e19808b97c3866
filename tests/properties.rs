//! Property-based tests for note lifecycle, rhythm purity and filter stability.

use proptest::prelude::*;
use keysynth::{
    config::FilterSettings,
    dsp::{
        filter::{FilterResponse, FilterStage, SVFilter},
        oscillator::Waveform,
    },
    engine::{
        filter_bank::{FilterBank, FilterLevel},
        rhythm::generate_rhythm,
    },
    io::samples::{SampleClip, SampleLibrary, SampleSlot},
    synth::note::Note,
};

const SAMPLE_RATE: f32 = 1_000.0;

fn waveform(index: usize) -> Waveform {
    Waveform::ALL[index % Waveform::ALL.len()]
}

fn level(index: usize) -> FilterLevel {
    FilterLevel::ALL[index % FilterLevel::ALL.len()]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Age advances by exactly one per rendered sample, dead or alive.
    #[test]
    fn age_counts_rendered_samples(
        wave in 0usize..4,
        frequency in 20.0f32..5_000.0f32,
        release_after in 0usize..400,
        total in 1usize..600,
    ) {
        let library = SampleLibrary::empty();
        let mut note = Note::held(frequency, waveform(wave));
        for rendered in 0..total {
            if rendered == release_after {
                note.request_release();
            }
            note.next_sample(SAMPLE_RATE, &library);
            prop_assert_eq!(note.age(), rendered as u64 + 1);
        }
    }

    /// A release never latches before the intro is over.
    #[test]
    fn release_waits_for_intro(release_after in 0u64..250) {
        let library = SampleLibrary::empty();
        let mut note = Note::held(440.0, Waveform::Sine);
        for _ in 0..release_after {
            note.next_sample(SAMPLE_RATE, &library);
        }
        note.request_release();
        for _ in 0..300 {
            note.next_sample(SAMPLE_RATE, &library);
            if let Some(latched) = note.release_age() {
                prop_assert!(latched as f32 / SAMPLE_RATE > 0.1);
                prop_assert!(latched >= release_after);
            }
        }
        prop_assert_eq!(note.release_age(), Some(release_after.max(101)));
    }

    /// Once dead, a note stays dead and renders exactly zero.
    #[test]
    fn dead_is_permanent_and_silent(
        wave in 0usize..4,
        release_after in 0usize..200,
        extra in 1usize..100,
    ) {
        let library = SampleLibrary::empty();
        let mut note = Note::held(220.0, waveform(wave));
        for _ in 0..release_after {
            note.next_sample(SAMPLE_RATE, &library);
        }
        note.request_release();
        while !note.is_dead() {
            note.next_sample(SAMPLE_RATE, &library);
        }
        for _ in 0..extra {
            prop_assert_eq!(note.next_sample(SAMPLE_RATE, &library), 0.0);
            prop_assert!(note.is_dead());
        }
    }

    /// Sample notes play their clip exactly once, whatever its length.
    #[test]
    fn sample_note_dies_at_clip_end(frames in 1usize..500, channels in 1u16..3) {
        let clip = SampleClip::from_interleaved(
            vec![0.5; frames * channels as usize],
            channels,
            SAMPLE_RATE as u32,
        );
        let library = SampleLibrary::new(clip, SampleClip::silent());
        let mut note = Note::sample(SampleSlot::A);
        for _ in 0..frames {
            note.next_sample(SAMPLE_RATE, &library);
            prop_assert!(!note.is_dead());
        }
        note.next_sample(SAMPLE_RATE, &library);
        prop_assert!(note.is_dead());
    }

    /// Rhythm output is a pure function of its arguments.
    #[test]
    fn rhythm_is_deterministic(
        index in 0u64..10_000_000,
        sample_rate in 8_000.0f32..192_000.0f32,
        wave in 0usize..4,
    ) {
        let a = generate_rhythm(index, sample_rate, Some(waveform(wave)));
        let b = generate_rhythm(index, sample_rate, Some(waveform(wave)));
        prop_assert_eq!(a.to_bits(), b.to_bits());
        prop_assert!(a.abs() <= 1.0);
    }

    /// Any walk through filter levels stays finite and bounded for bounded input.
    #[test]
    fn filter_bank_stays_finite(
        levels in prop::collection::vec((0usize..5, 0usize..5), 1..8),
        input in prop::array::uniform32(-1.0f32..=1.0f32),
        master in any::<bool>(),
    ) {
        let mut bank = FilterBank::new(&FilterSettings::default(), 48_000.0);
        let mut clock = 0u64;
        for (low, high) in levels {
            bank.refresh(level(low), level(high));
            for &x in &input {
                bank.modulate(clock);
                clock += 1;
                let out = bank.process(x, master);
                prop_assert!(out.is_finite());
            }
        }
    }

    /// One SVF stage is stable across the whole parameter range.
    #[test]
    fn svf_stage_is_stable(
        cutoff in 10.0f32..24_000.0f32,
        q in 0.1f32..10.0f32,
        high_pass in any::<bool>(),
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let response = if high_pass { FilterResponse::HighPass } else { FilterResponse::LowPass };
        let mut stage = SVFilter::new();
        stage.set_params(response, cutoff, 48_000.0, q);
        for &x in &input {
            prop_assert!(stage.process(x).is_finite());
        }
    }
}
