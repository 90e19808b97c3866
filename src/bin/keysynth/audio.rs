//! Output stream: the cpal callback drives the render engine.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    BufferSize, Device, Stream, StreamConfig,
};
use keysynth::KeySynth;
use rtrb::{Consumer, RingBuffer};
use tracing::{error, info, warn};

pub struct AudioOutput {
    /// Audio plays for as long as this is alive.
    _stream: Stream,
    pub sample_rate: f32,
    pub channels: usize,
    /// Mono copy of everything rendered, for the scope and spectrum.
    pub scope: Consumer<f32>,
}

/// Open the default output device and start rendering `synth` into it.
pub fn start(synth: &KeySynth, buffer_frames: u32, scope_len: usize) -> EyreResult<AudioOutput> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let supported = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    if supported.sample_format() != cpal::SampleFormat::F32 {
        return Err(eyre!(
            "output device uses {:?} samples, only f32 is supported",
            supported.sample_format()
        ));
    }

    let sample_rate = supported.sample_rate().0 as f32;
    let channels = supported.channels() as usize;
    let mut config: StreamConfig = supported.into();

    if buffer_frames > 0 {
        config.buffer_size = BufferSize::Fixed(buffer_frames);
    }
    let (stream, scope) = match build(&device, &config, synth, sample_rate, scope_len) {
        Ok(built) => built,
        Err(err) if buffer_frames > 0 => {
            warn!(buffer_frames, %err, "fixed buffer size rejected, using device default");
            config.buffer_size = BufferSize::Default;
            build(&device, &config, synth, sample_rate, scope_len)
                .wrap_err("failed to build output stream")?
        }
        Err(err) => return Err(err).wrap_err("failed to build output stream"),
    };

    stream.play().wrap_err("failed to start output stream")?;
    info!(
        device = %device.name().unwrap_or_else(|_| "unknown".into()),
        sample_rate,
        channels,
        buffer = ?config.buffer_size,
        "audio started"
    );

    Ok(AudioOutput {
        _stream: stream,
        sample_rate,
        channels,
        scope,
    })
}

fn build(
    device: &Device,
    config: &StreamConfig,
    synth: &KeySynth,
    sample_rate: f32,
    scope_len: usize,
) -> Result<(Stream, Consumer<f32>), cpal::BuildStreamError> {
    let channels = config.channels as usize;
    let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(scope_len);
    let mut engine = synth.engine(sample_rate);

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _| {
            engine.render_buffer_tapped(data, channels, &mut scope_tx);
        },
        |err| error!(%err, "output stream error"),
        None,
    )?;
    Ok((stream, scope_rx))
}
