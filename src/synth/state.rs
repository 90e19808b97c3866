//! Parameters shared between the input thread and the audio callback.
//!
//! Each field is an independent atomic with relaxed ordering. The render
//! pass reads each one once per buffer, so a buffer may combine a new
//! waveform with an old filter level; nothing depends on fields changing
//! together.

use std::{
    fmt,
    sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering},
};

use crate::{
    dsp::oscillator::{waveform_label, Waveform},
    engine::filter_bank::{level_label, FilterLevel},
};

pub struct SynthState {
    waveform: AtomicU8,
    low_pass: AtomicU8,
    high_pass: AtomicU8,
    rhythm_on: AtomicBool,
    master_filter_on: AtomicBool,
    sample_clock: AtomicU64,
}

impl SynthState {
    pub fn new() -> Self {
        Self {
            waveform: AtomicU8::new(Waveform::Sine.code()),
            low_pass: AtomicU8::new(FilterLevel::Off.code()),
            high_pass: AtomicU8::new(FilterLevel::Off.code()),
            rhythm_on: AtomicBool::new(false),
            master_filter_on: AtomicBool::new(false),
            sample_clock: AtomicU64::new(0),
        }
    }

    /// Back to Sine, both filters off, rhythm and master filter off.
    /// The published clock is left alone; it belongs to the render engine.
    pub fn reset(&self) {
        self.set_waveform(Waveform::Sine);
        self.low_pass.store(FilterLevel::Off.code(), Ordering::Relaxed);
        self.high_pass.store(FilterLevel::Off.code(), Ordering::Relaxed);
        self.rhythm_on.store(false, Ordering::Relaxed);
        self.master_filter_on.store(false, Ordering::Relaxed);
    }

    /// Currently selected waveform, `None` if the stored code is unknown.
    pub fn waveform(&self) -> Option<Waveform> {
        Waveform::from_code(self.waveform_code())
    }

    pub fn waveform_code(&self) -> u8 {
        self.waveform.load(Ordering::Relaxed)
    }

    pub fn set_waveform(&self, waveform: Waveform) {
        self.set_waveform_code(waveform.code());
    }

    /// Store a raw code. Codes outside the waveform set select silence.
    pub fn set_waveform_code(&self, code: u8) {
        self.waveform.store(code, Ordering::Relaxed);
    }

    pub fn low_pass(&self) -> Option<FilterLevel> {
        FilterLevel::from_code(self.low_pass.load(Ordering::Relaxed))
    }

    pub fn high_pass(&self) -> Option<FilterLevel> {
        FilterLevel::from_code(self.high_pass.load(Ordering::Relaxed))
    }

    pub fn cycle_low_pass(&self) -> FilterLevel {
        cycle(&self.low_pass)
    }

    pub fn cycle_high_pass(&self) -> FilterLevel {
        cycle(&self.high_pass)
    }

    pub fn rhythm_on(&self) -> bool {
        self.rhythm_on.load(Ordering::Relaxed)
    }

    /// Flip the rhythm flag and return the new value.
    pub fn toggle_rhythm(&self) -> bool {
        !self.rhythm_on.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn master_filter_on(&self) -> bool {
        self.master_filter_on.load(Ordering::Relaxed)
    }

    pub fn toggle_master_filter(&self) -> bool {
        !self.master_filter_on.fetch_xor(true, Ordering::Relaxed)
    }

    /// Samples rendered so far, as last published by the render engine.
    pub fn sample_clock(&self) -> u64 {
        self.sample_clock.load(Ordering::Relaxed)
    }

    pub fn publish_clock(&self, clock: u64) {
        self.sample_clock.store(clock, Ordering::Relaxed);
    }

    pub fn report(&self) -> ParamReport {
        ParamReport {
            waveform: self.waveform(),
            low_pass: self.low_pass(),
            high_pass: self.high_pass(),
            master_filter_on: self.master_filter_on(),
            rhythm_on: self.rhythm_on(),
        }
    }
}

impl Default for SynthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance a stored level code. An undecodable code restarts the cycle at Off.
fn cycle(slot: &AtomicU8) -> FilterLevel {
    let current = FilterLevel::from_code(slot.load(Ordering::Relaxed));
    let next = current.map_or(FilterLevel::Off, FilterLevel::next);
    slot.store(next.code(), Ordering::Relaxed);
    next
}

/// Point-in-time view of the parameters, formatted as the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamReport {
    pub waveform: Option<Waveform>,
    pub low_pass: Option<FilterLevel>,
    pub high_pass: Option<FilterLevel>,
    pub master_filter_on: bool,
    pub rhythm_on: bool,
}

impl fmt::Display for ParamReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "instrument: {}  LPF: {}  HPF: {}  master-out lpf: {}",
            waveform_label(self.waveform),
            level_label(self.low_pass),
            level_label(self.high_pass),
            if self.master_filter_on { "on" } else { "off" },
        )
    }
}
