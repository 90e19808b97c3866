use crate::dsp::{
    envelope::{envelope_points, ENVELOPE_TIME},
    oscillator::{note_to_frequency, phase_at, Waveform},
};

/*
Rhythm Layer
============

A looping bass figure, computed as a pure function of the sample index
since the rhythm was switched on. There is no sequencer state: restarting
the rhythm simply restarts the index at 0.

    beat     = floor(sample_rate) / 8 samples     (eight beats per second)
    cycle    = 32 beats
    beats  0..15 : phrase A, repeated four times
    beats 16..31 : phrase B, repeated four times

    phrase A   (2,0) (1,0) (2,3) (1,3)      octave jumps on A and C
    phrase B   (2,2) (1,2) (2,5) (1,5)      same shape, two semitones up

Each beat is a pluck: 0.1s rise, then a linear fall to zero at the end of
the beat, so consecutive beats never click into each other.

    gain
    1 ┤   ╱╲
      │  ╱   ╲___
    0 ┼─╱────────╲──▶ time within beat
      0  0.1    beat_time
*/

/// Beats in one rhythm cycle.
pub const CYCLE_BEATS: u64 = 32;

const PHRASE_A: [(i32, i32); 4] = [(2, 0), (1, 0), (2, 3), (1, 3)];
const PHRASE_B: [(i32, i32); 4] = [(2, 2), (1, 2), (2, 5), (1, 5)];

/// Length of one beat in samples. Zero for sample rates below 8 Hz.
pub fn beat_samples(sample_rate: f32) -> u64 {
    sample_rate.max(0.0).floor() as u64 / 8
}

/// `(octave, degree)` played on beat `beat` of the cycle.
pub fn beat_note(beat: u64) -> (i32, i32) {
    let beat = beat % CYCLE_BEATS;
    let phrase = if beat < CYCLE_BEATS / 2 {
        &PHRASE_A
    } else {
        &PHRASE_B
    };
    phrase[(beat % 4) as usize]
}

/// Rhythm sample `sample_index` samples after the rhythm started.
///
/// `None` (an undecodable waveform code) renders as silence.
pub fn generate_rhythm(sample_index: u64, sample_rate: f32, waveform: Option<Waveform>) -> f32 {
    let Some(waveform) = waveform else {
        return 0.0;
    };
    let beat_size = beat_samples(sample_rate);
    if beat_size == 0 {
        return 0.0;
    }
    let beat_time = beat_size as f32 / sample_rate;

    let beat = sample_index / beat_size;
    let offset = sample_index % beat_size;
    let seconds = offset as f32 / sample_rate;

    let (octave, degree) = beat_note(beat);
    let frequency = note_to_frequency(octave, degree);

    let gain = envelope_points(
        seconds,
        &[(0.0, 0.0), (ENVELOPE_TIME, 1.0), (beat_time, 0.0)],
    );
    waveform.render(phase_at(seconds, frequency)) * gain
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn beat_length_uses_floored_rate() {
        assert_eq!(beat_samples(44_100.0), 5_512);
        assert_eq!(beat_samples(48_000.0), 6_000);
        assert_eq!(beat_samples(44_100.9), 5_512);
    }

    #[test]
    fn phrases_alternate_every_sixteen_beats() {
        assert_eq!(beat_note(0), (2, 0));
        assert_eq!(beat_note(1), (1, 0));
        assert_eq!(beat_note(15), (1, 3));
        assert_eq!(beat_note(16), (2, 2));
        assert_eq!(beat_note(31), (1, 5));
        assert_eq!(beat_note(32), (2, 0));
    }

    #[test]
    fn each_beat_starts_silent() {
        let sample_rate = 48_000.0;
        let beat = beat_samples(sample_rate);
        for n in 0..40 {
            assert_eq!(generate_rhythm(n * beat, sample_rate, Some(Waveform::Square)), 0.0);
        }
    }

    #[test]
    fn pluck_peaks_at_envelope_time() {
        let sample_rate = 48_000.0;
        // 4800 samples = 0.1s; square is +1 at phase 0 of the cycle
        let peak = generate_rhythm(4_800, sample_rate, Some(Waveform::Square));
        assert_abs_diff_eq!(peak.abs(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn unknown_waveform_is_silent() {
        assert_eq!(generate_rhythm(1_000, 48_000.0, None), 0.0);
    }

    #[test]
    fn repeats_every_cycle() {
        let sample_rate = 16_000.0;
        let cycle = beat_samples(sample_rate) * CYCLE_BEATS;
        for index in [17, 2_345, 19_999] {
            let a = generate_rhythm(index, sample_rate, Some(Waveform::Saw));
            let b = generate_rhythm(index + cycle, sample_rate, Some(Waveform::Saw));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn tiny_sample_rates_do_not_divide_by_zero() {
        assert_eq!(generate_rhythm(3, 4.0, Some(Waveform::Sine)), 0.0);
    }
}
