//! Error types for configuration and sample loading.
//!
//! Nothing on the audio path returns an error; these only surface while the
//! synth is being set up.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating a [`crate::config::SynthConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read config '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds a value the synth cannot run with
    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors raised while decoding a sample clip.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("failed to decode '{path}': {source}")]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("'{path}' has an unsupported layout: {reason}")]
    Unsupported { path: PathBuf, reason: String },
}
