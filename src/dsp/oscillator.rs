use std::{f32::consts::TAU, fmt};

/*
Stateless Oscillators
=====================

Every tone in this synth is computed from the note's absolute age rather than
from an accumulated phase:

    phase = fract(age_in_seconds * frequency)

Integrating `phase += frequency / sample_rate` every sample slowly drifts
because of rounding; deriving it from elapsed time keeps the pitch exact for
the whole life of a note. The price is that frequency cannot change mid-note,
which is fine here since a note's pitch is fixed when the key goes down.

Shapes over one period (phase 0.0 .. 1.0):

    | waveform | phase 0.0 | phase 0.25 | phase 0.5 | phase 0.75 |
    | -------- | --------- | ---------- | --------- | ---------- |
    | sine     |  0        |  1         |  0        | -1         |
    | saw      | -1        | -0.5       |  0        |  0.5       |
    | square   |  1        |  1         | -1        | -1         |
    | triangle | -1        |  0         |  1        |  0         |
*/

/// Procedural waveform shapes available to held notes and the rhythm layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sine,
    Saw,
    Square,
    Triangle,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Saw,
        Waveform::Square,
        Waveform::Triangle,
    ];

    /// Evaluate the waveform at `phase` in `[0, 1)`. Output is bipolar `[-1, 1]`.
    #[inline]
    pub fn render(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Saw => 2.0 * phase - 1.0,
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => {
                if phase < 0.5 {
                    4.0 * phase - 1.0
                } else {
                    3.0 - 4.0 * phase
                }
            }
        }
    }

    /// Compact code used by the lock-free shared state.
    pub fn code(self) -> u8 {
        match self {
            Waveform::Sine => 0,
            Waveform::Saw => 1,
            Waveform::Square => 2,
            Waveform::Triangle => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Waveform::Sine),
            1 => Some(Waveform::Saw),
            2 => Some(Waveform::Square),
            3 => Some(Waveform::Triangle),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Saw => "Saw",
            Waveform::Square => "Square",
            Waveform::Triangle => "Triangle",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name for an optional waveform; undecodable codes show as `???`.
pub fn waveform_label(waveform: Option<Waveform>) -> &'static str {
    waveform.map_or("???", Waveform::name)
}

/// Phase of a tone after `seconds` of playback, in `[0, 1)`.
#[inline]
pub fn phase_at(seconds: f32, frequency: f32) -> f32 {
    (seconds * frequency).rem_euclid(1.0)
}

/// Equal-tempered pitch for a keyboard position.
///
/// `degree` counts semitones up from A, so octave 4 degree 0 is A440 and
/// each octave step doubles the frequency.
#[inline]
pub fn note_to_frequency(octave: i32, degree: i32) -> f32 {
    let semitones = ((octave - 4) * 12 + degree) as f32;
    440.0 * 2.0_f32.powf(semitones / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn shapes_hit_expected_landmarks() {
        assert_abs_diff_eq!(Waveform::Sine.render(0.25), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(Waveform::Saw.render(0.0), -1.0);
        assert_abs_diff_eq!(Waveform::Saw.render(0.75), 0.5);
        assert_eq!(Waveform::Square.render(0.49), 1.0);
        assert_eq!(Waveform::Square.render(0.5), -1.0);
        assert_abs_diff_eq!(Waveform::Triangle.render(0.0), -1.0);
        assert_abs_diff_eq!(Waveform::Triangle.render(0.5), 1.0);
        assert_abs_diff_eq!(Waveform::Triangle.render(0.75), 0.0);
    }

    #[test]
    fn output_stays_bipolar() {
        for waveform in Waveform::ALL {
            for i in 0..1000 {
                let sample = waveform.render(i as f32 / 1000.0);
                assert!(
                    (-1.0..=1.0).contains(&sample),
                    "{waveform} produced {sample} at step {i}"
                );
            }
        }
    }

    #[test]
    fn codes_roundtrip_and_unknown_is_none() {
        for waveform in Waveform::ALL {
            assert_eq!(Waveform::from_code(waveform.code()), Some(waveform));
        }
        assert_eq!(Waveform::from_code(42), None);
        assert_eq!(waveform_label(None), "???");
    }

    #[test]
    fn phase_wraps_into_unit_interval() {
        assert_abs_diff_eq!(phase_at(1.0, 440.0), 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(phase_at(0.5 / 440.0, 440.0), 0.5, epsilon = 1e-5);
    }

    #[test]
    fn keyboard_pitches() {
        assert_abs_diff_eq!(note_to_frequency(4, 0), 440.0, epsilon = 1e-3);
        assert_abs_diff_eq!(note_to_frequency(3, 0), 220.0, epsilon = 1e-3);
        assert_abs_diff_eq!(note_to_frequency(1, 0), 55.0, epsilon = 1e-3);
        assert_abs_diff_eq!(note_to_frequency(2, 12), 220.0, epsilon = 1e-3);
    }
}
