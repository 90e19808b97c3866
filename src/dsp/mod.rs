//! Low-level DSP primitives used by the note renderer and the filter bank.
//!
//! These components are allocation-free and realtime-safe. They stay focused
//! on the signal-processing math; note lifecycle and mixing live in
//! [`crate::synth`] and [`crate::engine`].

/// Breakpoint (piecewise-linear) envelopes.
pub mod envelope;
/// State-variable filter stage with a parameterize / apply contract.
pub mod filter;
/// Clock-driven LFO sweeps.
pub mod lfo;
/// Procedural waveforms and pitch helpers.
pub mod oscillator;

pub use envelope::{envelope_points, ENVELOPE_TIME};
pub use filter::{FilterResponse, FilterStage, SVFilter};
pub use lfo::LfoSweep;
pub use oscillator::{note_to_frequency, phase_at, Waveform};
