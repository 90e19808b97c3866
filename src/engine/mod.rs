//! The audio-thread side: filter bank, rhythm layer and the buffer renderer.

pub mod filter_bank;
pub mod render;
pub mod rhythm;

pub use filter_bank::{FilterBank, FilterChannel, FilterLevel};
pub use render::{RenderEngine, RenderStats, SampleSink};
pub use rhythm::generate_rhythm;
