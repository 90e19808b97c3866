//! keysynth - play the computer keyboard like a synthesizer
//!
//! Run with: cargo run -- --config keysynth.toml

mod app;
mod audio;
mod ui;

use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use keysynth::{io::samples::SampleLibrary, KeySynth, SynthConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "keysynth")]
#[command(about = "Terminal keyboard synthesizer with filter and rhythm demos")]
#[command(version)]
struct Args {
    /// TOML config file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where log output goes; the terminal belongs to the UI
    #[arg(long, default_value = "keysynth.log")]
    log_file: PathBuf,

    /// WAV file for sample key 5, overriding the config
    #[arg(long)]
    sample_a: Option<PathBuf>,

    /// WAV file for sample key 6, overriding the config
    #[arg(long)]
    sample_b: Option<PathBuf>,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let mut config = match &args.config {
        Some(path) => SynthConfig::load(path)
            .wrap_err_with(|| format!("failed to load config {}", path.display()))?,
        None => SynthConfig::default(),
    };
    if let Some(path) = args.sample_a {
        config.samples.a = Some(path);
    }
    if let Some(path) = args.sample_b {
        config.samples.b = Some(path);
    }

    let samples = SampleLibrary::load(&config.samples).wrap_err("failed to load samples")?;
    let synth = KeySynth::new(&config, samples);
    tracing::info!(?config, "starting keysynth");

    app::run(Arc::new(synth))
}

fn init_logging(path: &Path) -> EyreResult<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}
