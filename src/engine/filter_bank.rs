use std::fmt;

use crate::{
    config::FilterSettings,
    dsp::{
        filter::{FilterResponse, FilterStage, SVFilter},
        lfo::LfoSweep,
    },
};

/*
Filter Bank
===========

    notes + rhythm ──▶ [ LPF x N ] ──▶ [ HPF x N ] ──▶ [ master LPF ] ──▶ out
                        skipped if Off  skipped if Off   skipped if disabled

Each channel is N identical stages in series. One stage is a gentle
12 dB/oct slope; chaining four gives a steep 48 dB/oct cut without a
dedicated high-order design.

Levels and cutoffs (Hz):

    | level  | low-pass        | high-pass       |
    | ------ | --------------- | --------------- |
    | Off    | bypass          | bypass          |
    | Small  | 1760            | 220             |
    | Medium | 880             | 880             |
    | Large  | 220             | 1760            |
    | LFO    | 250..1500 @1/7Hz| 225..675 @1/8Hz |

"Small" means a small effect: the low-pass removes only the top, the
high-pass only the bottom. The tables mirror each other around 880 Hz.

When coefficients are recomputed:

  - static levels: once, on the buffer where the selected level changes
  - LFO: every sample, from the engine clock
  - Off: never; stale coefficients stay in the stages but they are skipped
*/

/// Selected strength of a filter channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterLevel {
    #[default]
    Off,
    Small,
    Medium,
    Large,
    Lfo,
}

impl FilterLevel {
    pub const ALL: [FilterLevel; 5] = [
        FilterLevel::Off,
        FilterLevel::Small,
        FilterLevel::Medium,
        FilterLevel::Large,
        FilterLevel::Lfo,
    ];

    /// Next level in the Off → Small → Medium → Large → LFO → Off cycle.
    pub fn next(self) -> Self {
        match self {
            FilterLevel::Off => FilterLevel::Small,
            FilterLevel::Small => FilterLevel::Medium,
            FilterLevel::Medium => FilterLevel::Large,
            FilterLevel::Large => FilterLevel::Lfo,
            FilterLevel::Lfo => FilterLevel::Off,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            FilterLevel::Off => 0,
            FilterLevel::Small => 1,
            FilterLevel::Medium => 2,
            FilterLevel::Large => 3,
            FilterLevel::Lfo => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        FilterLevel::ALL.get(code as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            FilterLevel::Off => "none",
            FilterLevel::Small => "small",
            FilterLevel::Medium => "medium",
            FilterLevel::Large => "large",
            FilterLevel::Lfo => "LFO",
        }
    }
}

impl fmt::Display for FilterLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name for an optional level; undecodable codes show as `??`.
pub fn level_label(level: Option<FilterLevel>) -> &'static str {
    level.map_or("??", FilterLevel::name)
}

/// Static cutoff per level. `None` for levels without a fixed cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoffTable {
    pub small: f32,
    pub medium: f32,
    pub large: f32,
}

impl CutoffTable {
    pub const LOW_PASS: CutoffTable = CutoffTable {
        small: 1760.0,
        medium: 880.0,
        large: 220.0,
    };

    pub const HIGH_PASS: CutoffTable = CutoffTable {
        small: 220.0,
        medium: 880.0,
        large: 1760.0,
    };

    pub fn cutoff(&self, level: FilterLevel) -> Option<f32> {
        match level {
            FilterLevel::Small => Some(self.small),
            FilterLevel::Medium => Some(self.medium),
            FilterLevel::Large => Some(self.large),
            FilterLevel::Off | FilterLevel::Lfo => None,
        }
    }
}

/// N cascaded stages sharing one response, level and cutoff.
pub struct FilterChannel<S: FilterStage = SVFilter> {
    stages: Vec<S>,
    response: FilterResponse,
    table: CutoffTable,
    sweep: LfoSweep,
    q: f32,
    sample_rate: f32,
    applied: FilterLevel,
    retunes: u64,
}

impl<S: FilterStage> FilterChannel<S> {
    pub fn new(
        stages: Vec<S>,
        response: FilterResponse,
        table: CutoffTable,
        sweep: LfoSweep,
        q: f32,
        sample_rate: f32,
    ) -> Self {
        Self {
            stages,
            response,
            table,
            sweep,
            q,
            sample_rate,
            applied: FilterLevel::Off,
            retunes: 0,
        }
    }

    /// Level the stages are currently configured for.
    pub fn level(&self) -> FilterLevel {
        self.applied
    }

    /// Number of full-cascade coefficient recomputations so far.
    pub fn retunes(&self) -> u64 {
        self.retunes
    }

    pub fn stages(&self) -> &[S] {
        &self.stages
    }

    /// Pick up a newly selected level. Retunes only on an actual change to a
    /// level with a static cutoff.
    pub fn refresh(&mut self, level: FilterLevel) {
        if level == self.applied {
            return;
        }
        self.applied = level;
        if let Some(cutoff) = self.table.cutoff(level) {
            self.retune(cutoff);
        }
    }

    /// Follow the LFO sweep at `clock`. No-op unless the level is LFO.
    #[inline]
    pub fn modulate(&mut self, clock: u64) {
        if self.applied == FilterLevel::Lfo {
            let cutoff = self.sweep.cutoff_at(clock, self.sample_rate);
            self.retune(cutoff);
        }
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        if self.applied == FilterLevel::Off {
            return input;
        }
        self.stages
            .iter_mut()
            .fold(input, |value, stage| stage.process(value))
    }

    fn retune(&mut self, cutoff_hz: f32) {
        for stage in &mut self.stages {
            stage.set_params(self.response, cutoff_hz, self.sample_rate, self.q);
        }
        self.retunes += 1;
    }
}

/// Cutoff and Q of the always-present master safety low-pass.
pub const MASTER_Q: f32 = 1.0;

/// Low-pass cascade, high-pass cascade and master low-pass, in series.
pub struct FilterBank<S: FilterStage = SVFilter> {
    low_pass: FilterChannel<S>,
    high_pass: FilterChannel<S>,
    master: S,
}

impl FilterBank<SVFilter> {
    pub fn new(settings: &FilterSettings, sample_rate: f32) -> Self {
        Self::with_stages(settings, sample_rate, SVFilter::new)
    }
}

impl<S: FilterStage> FilterBank<S> {
    /// Build a bank whose stages come from `make_stage`. The master filter is
    /// parameterized here, once, for the engine's fixed sample rate.
    pub fn with_stages(
        settings: &FilterSettings,
        sample_rate: f32,
        mut make_stage: impl FnMut() -> S,
    ) -> Self {
        let stages = settings.cascade_stages.max(1);
        let mut cascade = |response, table, sweep| {
            FilterChannel::new(
                (0..stages).map(|_| make_stage()).collect(),
                response,
                table,
                sweep,
                settings.resonance,
                sample_rate,
            )
        };

        let low_pass = cascade(
            FilterResponse::LowPass,
            CutoffTable::LOW_PASS,
            LfoSweep::between(1.0 / 7.0, 250.0, 1500.0),
        );
        let high_pass = cascade(
            FilterResponse::HighPass,
            CutoffTable::HIGH_PASS,
            LfoSweep::around(0.125, 450.0, 225.0),
        );

        let mut master = make_stage();
        master.set_params(
            FilterResponse::LowPass,
            settings.master_cutoff_hz,
            sample_rate,
            MASTER_Q,
        );

        Self {
            low_pass,
            high_pass,
            master,
        }
    }

    pub fn low_pass(&self) -> &FilterChannel<S> {
        &self.low_pass
    }

    pub fn high_pass(&self) -> &FilterChannel<S> {
        &self.high_pass
    }

    /// Once per buffer: react to level changes.
    pub fn refresh(&mut self, low_pass: FilterLevel, high_pass: FilterLevel) {
        self.low_pass.refresh(low_pass);
        self.high_pass.refresh(high_pass);
    }

    /// Once per sample: advance any LFO-driven channel.
    #[inline]
    pub fn modulate(&mut self, clock: u64) {
        self.low_pass.modulate(clock);
        self.high_pass.modulate(clock);
    }

    /// Low-pass, then high-pass, then (if enabled) the master low-pass.
    #[inline]
    pub fn process(&mut self, input: f32, master_enabled: bool) -> f32 {
        let value = self.low_pass.process(input);
        let value = self.high_pass.process(value);
        if master_enabled {
            self.master.process(value)
        } else {
            value
        }
    }
}
