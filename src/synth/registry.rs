//! The shared collection of sounding notes.
//!
//! One mutex guards the whole collection. The input thread takes it for a
//! single push or flag pass; the render thread takes it for an entire buffer
//! so every sample of that buffer sees the same set of notes. Holding it per
//! buffer rather than per sample is deliberate: it bounds input latency by
//! the buffer length, and keeps notes from appearing or releasing between two
//! samples of one buffer.

use parking_lot::{Mutex, MutexGuard};

use crate::{dsp::oscillator::Waveform, io::samples::SampleSlot, synth::note::Note};

const INITIAL_CAPACITY: usize = 64;

pub struct NoteRegistry {
    notes: Mutex<Vec<Note>>,
}

impl NoteRegistry {
    pub fn new() -> Self {
        Self {
            notes: Mutex::new(Vec::with_capacity(INITIAL_CAPACITY)),
        }
    }

    /// Start a held note.
    pub fn press(&self, frequency: f32, waveform: Waveform) {
        self.notes.lock().push(Note::held(frequency, waveform));
    }

    /// Start a one-shot sample note.
    pub fn trigger(&self, slot: SampleSlot) {
        self.notes.lock().push(Note::sample(slot));
    }

    /// Flag every note at `frequency` for release. Returns how many matched.
    pub fn release(&self, frequency: f32) -> usize {
        let mut notes = self.notes.lock();
        let mut flagged = 0;
        for note in notes.iter_mut().filter(|n| n.frequency() == frequency) {
            note.request_release();
            flagged += 1;
        }
        flagged
    }

    pub fn clear(&self) {
        self.notes.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.notes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.lock().is_empty()
    }

    /// Copy of the current notes, for inspection outside the audio thread.
    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.lock().clone()
    }

    /// Lock the collection for a whole render pass.
    pub fn lock(&self) -> MutexGuard<'_, Vec<Note>> {
        self.notes.lock()
    }
}

impl Default for NoteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove every dead note in one compaction pass. Returns how many were removed.
pub fn prune_dead(notes: &mut Vec<Note>) -> usize {
    let before = notes.len();
    notes.retain(|note| !note.is_dead());
    before - notes.len()
}
