//! Pre-loaded sample clips for fire-and-forget playback.

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader};
use tracing::{info, warn};

use crate::{config::SampleSettings, error::SampleError};

/// Which of the two sample slots a note plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleSlot {
    A,
    B,
}

impl SampleSlot {
    pub fn name(self) -> &'static str {
        match self {
            SampleSlot::A => "A",
            SampleSlot::B => "B",
        }
    }
}

/// Read-only interleaved audio clip.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleClip {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl SampleClip {
    /// Build a clip from interleaved samples. A zero channel count is treated as mono.
    pub fn from_interleaved(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Self {
        Self {
            samples,
            channels: channels.max(1),
            sample_rate,
        }
    }

    /// Zero-length clip: any note playing it dies on its first sample.
    pub fn silent() -> Self {
        Self::from_interleaved(Vec::new(), 1, 48_000)
    }

    /// Decode a WAV file, normalizing integer PCM to `[-1, 1]`.
    pub fn load_wav(path: impl AsRef<Path>) -> Result<Self, SampleError> {
        let path = path.as_ref();
        let wav_err = |source| SampleError::Wav {
            path: path.to_path_buf(),
            source,
        };

        let reader = WavReader::open(path).map_err(wav_err)?;
        let spec = reader.spec();
        if spec.channels == 0 {
            return Err(SampleError::Unsupported {
                path: path.to_path_buf(),
                reason: "zero channels".to_string(),
            });
        }

        let samples: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<Result<Vec<_>, _>>()
                .map_err(wav_err)?,
            SampleFormat::Int => {
                let bits = spec.bits_per_sample;
                if bits == 0 || bits > 32 {
                    return Err(SampleError::Unsupported {
                        path: path.to_path_buf(),
                        reason: format!("{bits}-bit integer samples"),
                    });
                }
                let max_val = (1i64 << (bits - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / max_val))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(wav_err)?
            }
        };

        Ok(Self::from_interleaved(samples, spec.channels, spec.sample_rate))
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total interleaved sample count.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn length_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f32 / self.sample_rate as f32
    }

    /// First-channel value of frame `index`, or `None` past the end.
    #[inline]
    pub fn frame(&self, index: u64) -> Option<f32> {
        let offset = usize::try_from(index)
            .ok()?
            .checked_mul(self.channels as usize)?;
        self.samples.get(offset).copied()
    }
}

/// The two clips sample notes can trigger.
#[derive(Debug, Clone)]
pub struct SampleLibrary {
    a: SampleClip,
    b: SampleClip,
}

impl SampleLibrary {
    pub fn new(a: SampleClip, b: SampleClip) -> Self {
        Self { a, b }
    }

    /// Library with both slots silent.
    pub fn empty() -> Self {
        Self::new(SampleClip::silent(), SampleClip::silent())
    }

    /// Load the configured slots. Unconfigured slots stay silent; a configured
    /// file that fails to decode is an error.
    pub fn load(settings: &SampleSettings) -> Result<Self, SampleError> {
        let a = load_slot(SampleSlot::A, settings.a.as_deref())?;
        let b = load_slot(SampleSlot::B, settings.b.as_deref())?;
        Ok(Self::new(a, b))
    }

    pub fn get(&self, slot: SampleSlot) -> &SampleClip {
        match slot {
            SampleSlot::A => &self.a,
            SampleSlot::B => &self.b,
        }
    }
}

impl Default for SampleLibrary {
    fn default() -> Self {
        Self::empty()
    }
}

fn load_slot(slot: SampleSlot, path: Option<&Path>) -> Result<SampleClip, SampleError> {
    let Some(path) = path else {
        warn!(slot = slot.name(), "no sample configured, slot will be silent");
        return Ok(SampleClip::silent());
    };

    let clip = SampleClip::load_wav(path)?;
    info!(
        slot = slot.name(),
        path = %path.display(),
        frames = clip.frames(),
        channels = clip.channels(),
        sample_rate = clip.sample_rate(),
        "loaded sample"
    );
    Ok(clip)
}

/// Resolve a configured sample path relative to the config file's directory.
pub fn resolve_relative(base: Option<&Path>, path: PathBuf) -> PathBuf {
    match base {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path,
    }
}
