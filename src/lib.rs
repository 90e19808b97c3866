pub mod config;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod io;
pub mod synth;

pub use config::SynthConfig;
pub use engine::{RenderEngine, RenderStats, SampleSink};
pub use error::{ConfigError, SampleError};
pub use synth::{InputDispatcher, KeyAction, KeySynth};
