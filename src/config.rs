//! TOML configuration for the synth and its terminal front end.
//!
//! Every section and field is optional; an empty file yields the defaults.
//!
//! ```toml
//! [audio]
//! buffer_frames = 512
//!
//! [filter]
//! cascade_stages = 4
//! resonance = 2.0
//! master_cutoff_hz = 440.0
//!
//! [samples]
//! a = "samples/cymbals.wav"
//! b = "samples/voice.wav"
//!
//! [input]
//! fallback_hold_ms = 350
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::{error::ConfigError, io::samples::resolve_relative};

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct SynthConfig {
    pub audio: AudioSettings,
    pub filter: FilterSettings,
    pub samples: SampleSettings,
    pub input: InputSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioSettings {
    /// Requested device buffer size in frames; 0 keeps the device default.
    ///
    /// The render pass holds the note lock for a whole buffer, so this also
    /// bounds how long a key event can wait.
    pub buffer_frames: u32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { buffer_frames: 512 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSettings {
    /// Identical stages chained per low-pass / high-pass channel.
    pub cascade_stages: usize,
    /// Q of every cascade stage.
    pub resonance: f32,
    pub master_cutoff_hz: f32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            cascade_stages: 4,
            resonance: 2.0,
            master_cutoff_hz: 440.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct SampleSettings {
    pub a: Option<PathBuf>,
    pub b: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputSettings {
    /// How long a note is held when the terminal cannot report key releases.
    pub fallback_hold_ms: u64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            fallback_hold_ms: 350,
        }
    }
}

impl SynthConfig {
    /// Read and validate a config file. Relative sample paths are resolved
    /// against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|source| ConfigError::read_file(path, source))?;
        let mut config = Self::from_toml_str(&text)?;

        let base = path.parent();
        config.samples.a = config.samples.a.take().map(|p| resolve_relative(base, p));
        config.samples.b = config.samples.b.take().map(|p| resolve_relative(base, p));

        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.filter.cascade_stages == 0 {
            return Err(ConfigError::invalid(
                "filter.cascade_stages",
                "must be at least 1",
            ));
        }
        if !(self.filter.resonance.is_finite() && self.filter.resonance > 0.0) {
            return Err(ConfigError::invalid(
                "filter.resonance",
                format!("must be a positive number, got {}", self.filter.resonance),
            ));
        }
        if !(self.filter.master_cutoff_hz.is_finite() && self.filter.master_cutoff_hz > 0.0) {
            return Err(ConfigError::invalid(
                "filter.master_cutoff_hz",
                format!(
                    "must be a positive frequency, got {}",
                    self.filter.master_cutoff_hz
                ),
            ));
        }
        Ok(())
    }
}
