use crate::{
    dsp::{
        envelope::{envelope_points, intro, outro, ENVELOPE_TIME},
        oscillator::{phase_at, Waveform},
    },
    io::samples::{SampleLibrary, SampleSlot},
};

/*
Note Lifecycle
==============

A note is one sounding voice. It is created on key press (or a sample
trigger), advanced one sample at a time by the render pass, and removed by
the pruning pass at the end of the buffer in which it died.

    key down                     key up             intro done      0.1s later
       │                           │                    │               │
       ▼                           ▼                    ▼               ▼
    ┌───────┬────────────────────────────────────┬───────────────┬─────────┐
    │ intro │            sustain (gain 1)         │    release    │  dead   │
    └───────┴────────────────────────────────────┴───────────────┴─────────┘
     0→1 over 0.1s                    wants_release   1→0 over 0.1s   pruned

Rules the fields obey:

  age            +1 for every rendered sample, dead or alive
  wants_release  false → true at most once (key up)
  release_age    latched once, and only after the intro has finished; a key
                 released during the intro keeps ramping up first, so a
                 release can never cut the attack short or restart it
  dead           false → true at most once; a dead note outputs 0

Sample notes ignore key release entirely. They fade in, play the clip to its
end, fade out over the last 0.1s and die when the clip runs out.
*/

/// Headroom applied to tones so several notes can sum without clipping.
pub const NOTE_HEADROOM: f32 = 0.8;

/// What a note plays. Closed set, dispatched once per sample per note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveKind {
    Tone(Waveform),
    Sample(SampleSlot),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    frequency: f32,
    kind: WaveKind,
    age: u64,
    release_age: Option<u64>,
    wants_release: bool,
    dead: bool,
}

impl Note {
    fn new(frequency: f32, kind: WaveKind) -> Self {
        Self {
            frequency,
            kind,
            age: 0,
            release_age: None,
            wants_release: false,
            dead: false,
        }
    }

    /// A keyboard note, sustained until released.
    pub fn held(frequency: f32, waveform: Waveform) -> Self {
        Self::new(frequency, WaveKind::Tone(waveform))
    }

    /// A one-shot clip playback. Pitch is ignored, so frequency is 0.
    pub fn sample(slot: SampleSlot) -> Self {
        Self::new(0.0, WaveKind::Sample(slot))
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn kind(&self) -> WaveKind {
        self.kind
    }

    /// Samples rendered so far.
    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn release_age(&self) -> Option<u64> {
        self.release_age
    }

    pub fn wants_release(&self) -> bool {
        self.wants_release
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Ask the note to start its release once the intro allows it.
    pub fn request_release(&mut self) {
        self.wants_release = true;
    }

    /// Gain for a held note at `age` samples (`age_seconds` in seconds).
    ///
    /// Latches the release point and sets `dead` as side effects.
    pub fn envelope(&mut self, age: u64, age_seconds: f32, sample_rate: f32) -> f32 {
        if self.release_age.is_none() {
            if self.wants_release && age_seconds > ENVELOPE_TIME {
                self.release_age = Some(age);
            } else {
                return intro(age_seconds);
            }
        }

        let release_age = self.release_age.unwrap_or(age);
        let seconds_in_release = age_seconds - release_age as f32 / sample_rate;
        if seconds_in_release > ENVELOPE_TIME {
            self.dead = true;
            return 0.0;
        }
        outro(seconds_in_release)
    }

    /// Render one sample and advance the note by one sample.
    pub fn next_sample(&mut self, sample_rate: f32, samples: &SampleLibrary) -> f32 {
        let age = self.age;
        let age_seconds = age as f32 / sample_rate;
        self.age += 1;

        if self.dead {
            return 0.0;
        }

        match self.kind {
            WaveKind::Tone(waveform) => {
                let gain = self.envelope(age, age_seconds, sample_rate) * NOTE_HEADROOM;
                waveform.render(phase_at(age_seconds, self.frequency)) * gain
            }
            WaveKind::Sample(slot) => {
                let clip = samples.get(slot);
                let Some(value) = clip.frame(age) else {
                    self.dead = true;
                    return 0.0;
                };
                let length = clip.length_seconds();
                let gain = envelope_points(
                    age_seconds,
                    &[
                        (0.0, 0.0),
                        (ENVELOPE_TIME, 1.0),
                        (length - ENVELOPE_TIME, 1.0),
                        (length, 0.0),
                    ],
                );
                value * gain
            }
        }
    }
}
