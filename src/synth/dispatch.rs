//! Turns key events into parameter changes and note registry operations.
//!
//! Runs on the input thread. Everything it touches is either an atomic in
//! [`SynthState`] or a short registry lock, so a key event never waits on
//! more than one in-flight audio buffer.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    dsp::oscillator::Waveform,
    engine::filter_bank::FilterLevel,
    io::{
        keymap::{control_for, note_frequency, Control, Key},
        samples::SampleSlot,
    },
    synth::{registry::NoteRegistry, state::SynthState},
};

/// What a key event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    WaveformSelected(Waveform),
    SampleTriggered(SampleSlot),
    LowPassCycled(FilterLevel),
    HighPassCycled(FilterLevel),
    RhythmToggled(bool),
    MasterFilterToggled(bool),
    NotePressed { frequency: f32 },
    NoteReleased { frequency: f32, flagged: usize },
    Ignored,
}

impl KeyAction {
    /// True for actions that change a displayed parameter.
    pub fn changes_params(&self) -> bool {
        matches!(
            self,
            KeyAction::WaveformSelected(_)
                | KeyAction::LowPassCycled(_)
                | KeyAction::HighPassCycled(_)
                | KeyAction::RhythmToggled(_)
                | KeyAction::MasterFilterToggled(_)
        )
    }
}

#[derive(Clone)]
pub struct InputDispatcher {
    state: Arc<SynthState>,
    notes: Arc<NoteRegistry>,
}

impl InputDispatcher {
    pub fn new(state: Arc<SynthState>, notes: Arc<NoteRegistry>) -> Self {
        Self { state, notes }
    }

    /// Reserved for acquiring resources before the first `on_enter`.
    pub fn on_init(&self) {}

    /// Start a fresh session: default parameters and no sounding notes.
    pub fn on_enter(&self) {
        self.state.reset();
        self.notes.clear();
        info!("{}", self.state.report());
    }

    /// Reserved for releasing resources after the last session.
    pub fn on_exit(&self) {}

    pub fn on_key(&self, key: Key, pressed: bool) -> KeyAction {
        if let Some(control) = control_for(key) {
            if !pressed {
                return KeyAction::Ignored;
            }
            let action = self.apply(control);
            if action.changes_params() {
                info!("{}", self.state.report());
            }
            return action;
        }

        let Some(frequency) = note_frequency(key) else {
            return KeyAction::Ignored;
        };

        if pressed {
            let Some(waveform) = self.state.waveform() else {
                debug!(?key, "no playable waveform selected");
                return KeyAction::Ignored;
            };
            self.notes.press(frequency, waveform);
            debug!(
                ?key,
                frequency,
                clock = self.state.sample_clock(),
                "note on"
            );
            KeyAction::NotePressed { frequency }
        } else {
            let flagged = self.notes.release(frequency);
            debug!(?key, frequency, flagged, "note off");
            KeyAction::NoteReleased { frequency, flagged }
        }
    }

    fn apply(&self, control: Control) -> KeyAction {
        match control {
            Control::SelectWaveform(waveform) => {
                self.state.set_waveform(waveform);
                KeyAction::WaveformSelected(waveform)
            }
            Control::TriggerSample(slot) => {
                self.notes.trigger(slot);
                debug!(slot = slot.name(), "sample triggered");
                KeyAction::SampleTriggered(slot)
            }
            Control::CycleLowPass => KeyAction::LowPassCycled(self.state.cycle_low_pass()),
            Control::CycleHighPass => KeyAction::HighPassCycled(self.state.cycle_high_pass()),
            Control::ToggleRhythm => KeyAction::RhythmToggled(self.state.toggle_rhythm()),
            Control::ToggleMasterFilter => {
                KeyAction::MasterFilterToggled(self.state.toggle_master_filter())
            }
        }
    }
}
