use std::f32::consts::PI;

/*
| response  | passes       | rejects      | used for                          |
| --------- | ------------ | ------------ | --------------------------------- |
| low-pass  | below cutoff | above cutoff | LPF cascade, master safety filter |
| high-pass | above cutoff | below cutoff | HPF cascade                       |

The stage is a topology-preserving (trapezoidal) state-variable filter. It
is split into the two halves the filter bank needs:

  set_params   compute coefficients (g, k, h) from cutoff / sample rate / Q
  process      run one sample through the two integrators

Coefficients are cached between calls so a static cutoff costs nothing per
sample; an LFO sweep simply calls `set_params` every sample.

  g = tan(pi * cutoff / sample_rate)     prewarped integrator gain
  k = 1 / Q                              damping
  h = 1 / (1 + g * (g + k))
*/

/// Which output of the state-variable core a stage returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResponse {
    LowPass,
    HighPass,
}

/// One recursive filter unit with a parameterize / apply contract.
///
/// Each instance owns its own integrator state, so identical stages can be
/// chained to steepen the rolloff.
pub trait FilterStage: Send {
    /// Recompute coefficients. Internal state is kept so a sweep stays smooth.
    fn set_params(&mut self, response: FilterResponse, cutoff_hz: f32, sample_rate: f32, q: f32);

    /// Filter one sample, updating internal state.
    fn process(&mut self, input: f32) -> f32;

    /// Clear internal state.
    fn reset(&mut self);
}

const MIN_CUTOFF_HZ: f32 = 10.0;
const MIN_Q: f32 = 0.05;

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    g: f32,
    k: f32,
    h: f32,
    response: FilterResponse,
}

impl SVFilter {
    /// A stage with a passthrough-ish default (1 kHz low-pass at 48 kHz, Q 0.707).
    pub fn new() -> Self {
        let mut filter = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: 0.0,
            k: 0.0,
            h: 0.0,
            response: FilterResponse::LowPass,
        };
        filter.set_params(FilterResponse::LowPass, 1000.0, 48_000.0, std::f32::consts::FRAC_1_SQRT_2);
        filter
    }

    pub fn lowpass(cutoff_hz: f32, sample_rate: f32, q: f32) -> Self {
        let mut filter = Self::new();
        filter.set_params(FilterResponse::LowPass, cutoff_hz, sample_rate, q);
        filter
    }

    pub fn highpass(cutoff_hz: f32, sample_rate: f32, q: f32) -> Self {
        let mut filter = Self::new();
        filter.set_params(FilterResponse::HighPass, cutoff_hz, sample_rate, q);
        filter
    }

    pub fn response(&self) -> FilterResponse {
        self.response
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

impl Default for SVFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterStage for SVFilter {
    fn set_params(&mut self, response: FilterResponse, cutoff_hz: f32, sample_rate: f32, q: f32) {
        let nyquist_guard = (sample_rate * 0.49).max(MIN_CUTOFF_HZ);
        let cutoff = cutoff_hz.clamp(MIN_CUTOFF_HZ, nyquist_guard);

        self.g = (PI * cutoff / sample_rate).tan();
        self.k = 1.0 / q.max(MIN_Q);
        self.h = 1.0 / (1.0 + self.g * (self.g + self.k));
        self.response = response;
    }

    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let v3 = input - self.ic2eq;
        let v1 = self.h * (self.ic1eq + self.g * v3);
        let v2 = self.ic2eq + self.g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        match self.response {
            FilterResponse::LowPass => v2,
            FilterResponse::HighPass => input - self.k * v1 - v2,
        }
    }

    fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::{phase_at, Waveform};

    const SAMPLE_RATE: f32 = 48_000.0;

    fn sine(frequency: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| Waveform::Sine.render(phase_at(i as f32 / SAMPLE_RATE, frequency)))
            .collect()
    }

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len().min(256);
        buffer[skip..].iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn test_lowpass_basic() {
        let mut filter = SVFilter::lowpass(500.0, SAMPLE_RATE, 0.707);
        let mut buffer = vec![1.0; 512];

        filter.render(&mut buffer);

        assert!(buffer[511] > 0.99, "DC should pass, got {}", buffer[511]);
    }

    #[test]
    fn test_highpass_basic() {
        let mut filter = SVFilter::highpass(500.0, SAMPLE_RATE, 0.707);
        let mut buffer = vec![1.0; 512];

        filter.render(&mut buffer);

        assert!(buffer[511].abs() < 0.01, "DC should be blocked, got {}", buffer[511]);
    }

    #[test]
    fn test_lowpass_filters_high_freq() {
        let mut filter = SVFilter::lowpass(500.0, SAMPLE_RATE, 0.707);
        let mut buffer = sine(5_000.0, 1024);

        filter.render(&mut buffer);

        let peak = peak_after_transient(&buffer);
        assert!(peak < 0.05, "Expected high freq attenuation, got peak: {}", peak);
    }

    #[test]
    fn test_highpass_filters_low_freq() {
        let mut filter = SVFilter::highpass(2_000.0, SAMPLE_RATE, 0.707);
        let mut buffer = sine(100.0, 4096);

        filter.render(&mut buffer);

        let peak = peak_after_transient(&buffer);
        assert!(peak < 0.05, "Expected low freq attenuation, got peak: {}", peak);
    }

    #[test]
    fn test_resonance_boosts_cutoff() {
        let cutoff = 1_000.0;

        let mut flat = SVFilter::lowpass(cutoff, SAMPLE_RATE, 0.5);
        let mut buffer = sine(cutoff, 2048);
        flat.render(&mut buffer);
        let flat_peak = peak_after_transient(&buffer);

        let mut resonant = SVFilter::lowpass(cutoff, SAMPLE_RATE, 4.0);
        let mut buffer = sine(cutoff, 2048);
        resonant.render(&mut buffer);
        let resonant_peak = peak_after_transient(&buffer);

        assert!(
            resonant_peak > flat_peak * 2.0,
            "High Q should boost signal at cutoff: resonant={}, flat={}",
            resonant_peak,
            flat_peak
        );
    }

    #[test]
    fn test_extreme_cutoff_stays_finite() {
        let mut filter = SVFilter::lowpass(1.0e9, SAMPLE_RATE, 2.0);
        let mut buffer = sine(440.0, 512);
        filter.render(&mut buffer);
        assert!(buffer.iter().all(|s| s.is_finite()));

        filter.set_params(FilterResponse::HighPass, -5.0, SAMPLE_RATE, 0.0);
        filter.render(&mut buffer);
        assert!(buffer.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = SVFilter::lowpass(200.0, SAMPLE_RATE, 1.0);
        let mut buffer = vec![1.0; 64];
        filter.render(&mut buffer);

        filter.reset();
        assert_eq!(filter.process(0.0), 0.0);
    }
}
