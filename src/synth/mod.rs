//! Note lifecycle, the shared note registry and synth parameters, plus the
//! input dispatcher that drives them.
//!
//! [`KeySynth`] wires these together: the dispatcher lives on the input
//! thread, the [`RenderEngine`] on the audio thread, and both share the
//! same [`SynthState`] and [`NoteRegistry`].

pub mod dispatch;
pub mod note;
pub mod registry;
pub mod state;

use std::sync::Arc;

pub use dispatch::{InputDispatcher, KeyAction};
pub use note::{Note, WaveKind};
pub use registry::NoteRegistry;
pub use state::{ParamReport, SynthState};

use crate::{config::SynthConfig, engine::render::RenderEngine, io::samples::SampleLibrary};

pub struct KeySynth {
    config: SynthConfig,
    state: Arc<SynthState>,
    notes: Arc<NoteRegistry>,
    samples: Arc<SampleLibrary>,
}

impl KeySynth {
    pub fn new(config: &SynthConfig, samples: SampleLibrary) -> Self {
        Self {
            config: config.clone(),
            state: Arc::new(SynthState::new()),
            notes: Arc::new(NoteRegistry::new()),
            samples: Arc::new(samples),
        }
    }

    /// Build the audio-thread renderer for a device running at `sample_rate`.
    pub fn engine(&self, sample_rate: f32) -> RenderEngine {
        RenderEngine::new(
            sample_rate,
            &self.config.filter,
            self.state.clone(),
            self.notes.clone(),
            self.samples.clone(),
        )
    }

    pub fn dispatcher(&self) -> InputDispatcher {
        InputDispatcher::new(self.state.clone(), self.notes.clone())
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn state(&self) -> &Arc<SynthState> {
        &self.state
    }

    pub fn notes(&self) -> &Arc<NoteRegistry> {
        &self.notes
    }

    pub fn samples(&self) -> &Arc<SampleLibrary> {
        &self.samples
    }
}
