//! Low Frequency Oscillator (LFO) helpers for filter sweeps.

use std::f32::consts::TAU;

/*
Clock-Driven Sweeps
===================

The filter LFOs here are not free-running oscillators with their own phase.
They are a pure function of the engine's global sample clock:

    lfo(clock) = sin(2 * pi * rate_hz * clock / sample_rate)

so two channels sweeping at different rates never need to share state, and
the sweep position is reproducible for any clock value.

The bipolar LFO value (-1 .. +1) is mapped onto a cutoff range:

    cutoff = center + depth * lfo

    low-pass  : 1/7 Hz   center  875 Hz  depth 625 Hz   (250 .. 1500 Hz)
    high-pass : 1/8 Hz   center  450 Hz  depth 225 Hz   (225 ..  675 Hz)

At 1/7 Hz one full sweep takes seven seconds, slow enough to hear the
filter open and close across several notes.
*/

/// Convert bipolar signal (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    (bipolar + 1.0) * 0.5
}

/// Map a bipolar value onto `[min, max]`.
#[inline]
pub fn scale_bipolar(bipolar: f32, min: f32, max: f32) -> f32 {
    min + bipolar_to_unipolar(bipolar) * (max - min)
}

/// A sinusoidal cutoff sweep locked to the sample clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LfoSweep {
    pub rate_hz: f32,
    pub center_hz: f32,
    pub depth_hz: f32,
}

impl LfoSweep {
    /// Sweep between `min_hz` and `max_hz`.
    pub fn between(rate_hz: f32, min_hz: f32, max_hz: f32) -> Self {
        Self {
            rate_hz,
            center_hz: (min_hz + max_hz) * 0.5,
            depth_hz: (max_hz - min_hz) * 0.5,
        }
    }

    pub fn around(rate_hz: f32, center_hz: f32, depth_hz: f32) -> Self {
        Self {
            rate_hz,
            center_hz,
            depth_hz,
        }
    }

    /// Bipolar LFO value at `clock` samples.
    #[inline]
    pub fn value_at(&self, clock: u64, sample_rate: f32) -> f32 {
        // Reduce the clock to one period first so f32 keeps its precision
        // after hours of playback.
        let period = (sample_rate as f64 / self.rate_hz as f64).max(1.0);
        let position = (clock as f64 % period) / period;
        (TAU * position as f32).sin()
    }

    #[inline]
    pub fn cutoff_at(&self, clock: u64, sample_rate: f32) -> f32 {
        self.center_hz + self.depth_hz * self.value_at(clock, sample_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bipolar_to_unipolar() {
        assert_abs_diff_eq!(bipolar_to_unipolar(-1.0), 0.0);
        assert_abs_diff_eq!(bipolar_to_unipolar(0.0), 0.5);
        assert_abs_diff_eq!(bipolar_to_unipolar(1.0), 1.0);
    }

    #[test]
    fn test_scale_bipolar() {
        assert_abs_diff_eq!(scale_bipolar(-1.0, 250.0, 1500.0), 250.0);
        assert_abs_diff_eq!(scale_bipolar(0.0, 250.0, 1500.0), 875.0);
        assert_abs_diff_eq!(scale_bipolar(1.0, 250.0, 1500.0), 1500.0);
    }

    #[test]
    fn between_matches_scaled_range() {
        let sweep = LfoSweep::between(1.0 / 7.0, 250.0, 1500.0);
        assert_abs_diff_eq!(sweep.center_hz, 875.0);
        assert_abs_diff_eq!(sweep.depth_hz, 625.0);
    }

    #[test]
    fn sweep_starts_at_center_and_peaks_quarter_period() {
        let sample_rate = 48_000.0;
        let sweep = LfoSweep::around(0.125, 450.0, 225.0);

        assert_abs_diff_eq!(sweep.cutoff_at(0, sample_rate), 450.0, epsilon = 1e-3);

        // 0.125 Hz -> 8 s period -> quarter period = 2 s
        let quarter = (2.0 * sample_rate) as u64;
        assert_abs_diff_eq!(sweep.cutoff_at(quarter, sample_rate), 675.0, epsilon = 1e-2);
    }

    #[test]
    fn sweep_stays_in_range_for_long_clocks() {
        let sample_rate = 44_100.0;
        let sweep = LfoSweep::between(1.0 / 7.0, 250.0, 1500.0);
        for clock in (0..u64::from(u32::MAX)).step_by(9_999_991) {
            let cutoff = sweep.cutoff_at(clock, sample_rate);
            assert!((249.9..=1500.1).contains(&cutoff), "{cutoff} at {clock}");
        }
    }
}
