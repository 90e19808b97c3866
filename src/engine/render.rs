use std::sync::Arc;

use crate::{
    config::FilterSettings,
    engine::{
        filter_bank::{FilterBank, FilterLevel},
        rhythm::generate_rhythm,
    },
    io::samples::SampleLibrary,
    synth::{registry::prune_dead, registry::NoteRegistry, state::SynthState},
};

/*
Render Pass
===========

One call renders one device buffer. Parameters are sampled once at the top,
then the note collection is locked for the whole buffer:

    1. filters   pick up LPF / HPF level changes (static retune on change)
    2. rhythm    latch a start clock when the rhythm flag flips
    3. lock      note registry, held until step 5
    4. per frame
         modulate LFO filters at clock + i
         sum every note's next sample
         + rhythm(clock + i - rhythm_start)      if rhythm is on
         LPF cascade → HPF cascade → master LPF   (each optional)
         copy the mono value to every channel, push it to the tap
    5. prune dead notes, unlock, advance and publish the clock

    clock ─────────────┬──────────────┬──────────────┬────────▶
                       │   buffer n   │  buffer n+1  │
                       └── lock ──────┴── lock ──────┘

Between buffers the input thread can take the lock to add or release notes;
within a buffer every frame sees the same notes.
*/

/// Destination for the mono signal as it is rendered, e.g. a scope ring.
pub trait SampleSink {
    fn push_sample(&mut self, sample: f32);
}

impl SampleSink for () {
    #[inline]
    fn push_sample(&mut self, _sample: f32) {}
}

impl SampleSink for Vec<f32> {
    #[inline]
    fn push_sample(&mut self, sample: f32) {
        self.push(sample);
    }
}

/// Drops samples when the ring is full; the reader is only a visualizer.
#[cfg(feature = "rtrb")]
impl SampleSink for rtrb::Producer<f32> {
    #[inline]
    fn push_sample(&mut self, sample: f32) {
        let _ = self.push(sample);
    }
}

/// What one render pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Complete frames written.
    pub frames: usize,
    /// Notes left in the registry after pruning.
    pub active_notes: usize,
    /// Dead notes removed at the end of the pass.
    pub pruned: usize,
}

pub struct RenderEngine {
    sample_rate: f32,
    clock: u64,
    filters: FilterBank,
    rhythm_was_on: bool,
    rhythm_start: u64,
    state: Arc<SynthState>,
    notes: Arc<NoteRegistry>,
    samples: Arc<SampleLibrary>,
}

impl RenderEngine {
    pub fn new(
        sample_rate: f32,
        filter_settings: &FilterSettings,
        state: Arc<SynthState>,
        notes: Arc<NoteRegistry>,
        samples: Arc<SampleLibrary>,
    ) -> Self {
        Self {
            sample_rate,
            clock: 0,
            filters: FilterBank::new(filter_settings, sample_rate),
            rhythm_was_on: false,
            rhythm_start: 0,
            state,
            notes,
            samples,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Frames rendered since construction.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Clock value at which the rhythm was last switched on or off.
    pub fn rhythm_start(&self) -> u64 {
        self.rhythm_start
    }

    pub fn filters(&self) -> &FilterBank {
        &self.filters
    }

    /// Render an interleaved buffer of `channels` channels.
    pub fn render_buffer(&mut self, out: &mut [f32], channels: usize) -> RenderStats {
        self.render_buffer_tapped(out, channels, &mut ())
    }

    /// Like [`render_buffer`](Self::render_buffer), also pushing each mono
    /// frame value to `tap`.
    pub fn render_buffer_tapped<T: SampleSink + ?Sized>(
        &mut self,
        out: &mut [f32],
        channels: usize,
        tap: &mut T,
    ) -> RenderStats {
        if channels == 0 {
            return RenderStats::default();
        }
        let frames = out.len() / channels;
        out[frames * channels..].fill(0.0);

        let low_pass = self.state.low_pass().unwrap_or(FilterLevel::Off);
        let high_pass = self.state.high_pass().unwrap_or(FilterLevel::Off);
        self.filters.refresh(low_pass, high_pass);
        let master_on = self.state.master_filter_on();

        let rhythm_on = self.state.rhythm_on();
        if rhythm_on != self.rhythm_was_on {
            self.rhythm_was_on = rhythm_on;
            self.rhythm_start = self.clock;
        }
        let waveform = self.state.waveform();

        let sample_rate = self.sample_rate;
        let samples = &*self.samples;
        let mut notes = self.notes.lock();

        for (i, frame) in out.chunks_exact_mut(channels).enumerate() {
            let clock = self.clock + i as u64;
            self.filters.modulate(clock);

            let mut value: f32 = notes
                .iter_mut()
                .map(|note| note.next_sample(sample_rate, samples))
                .sum();

            if rhythm_on {
                value += generate_rhythm(clock - self.rhythm_start, sample_rate, waveform);
            }

            let value = self.filters.process(value, master_on);
            frame.fill(value);
            tap.push_sample(value);
        }

        let pruned = prune_dead(&mut notes);
        let active_notes = notes.len();
        drop(notes);

        self.clock += frames as u64;
        self.state.publish_clock(self.clock);

        RenderStats {
            frames,
            active_notes,
            pruned,
        }
    }
}
