//! Wires the synth to the audio device and the terminal.

use std::{io::stdout, sync::Arc, time::Duration};

use color_eyre::eyre::Result as EyreResult;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::supports_keyboard_enhancement,
};
use keysynth::KeySynth;
use tracing::{info, warn};

use crate::{
    audio,
    ui::{FallbackReleases, UiApp, SCOPE_LEN},
};

/// Scope ring capacity, in scope windows.
const SCOPE_RING_WINDOWS: usize = 8;

pub fn run(synth: Arc<KeySynth>) -> EyreResult<()> {
    let dispatcher = synth.dispatcher();
    dispatcher.on_init();

    let output = audio::start(
        &synth,
        synth.config().audio.buffer_frames,
        SCOPE_LEN * SCOPE_RING_WINDOWS,
    )?;
    dispatcher.on_enter();

    let mut terminal = ratatui::init();
    let enhanced = enable_key_releases();
    let fallback = if enhanced {
        None
    } else {
        let hold = Duration::from_millis(synth.config().input.fallback_hold_ms);
        warn!(?hold, "terminal cannot report key releases, notes release on a timer");
        Some(FallbackReleases::new(hold))
    };

    let mut app = UiApp::new(
        dispatcher.clone(),
        synth.state().clone(),
        synth.notes().clone(),
        output.scope,
        output.sample_rate,
        fallback,
    );
    let result = app.run(&mut terminal);

    if enhanced {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    }
    ratatui::restore();
    dispatcher.on_exit();
    info!(channels = output.channels, "keysynth stopped");
    result
}

/// Ask the terminal for press/release events and standalone modifier keys.
fn enable_key_releases() -> bool {
    if !matches!(supports_keyboard_enhancement(), Ok(true)) {
        return false;
    }
    let flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES;
    match execute!(stdout(), PushKeyboardEnhancementFlags(flags)) {
        Ok(()) => true,
        Err(err) => {
            warn!(%err, "failed to enable keyboard enhancement");
            false
        }
    }
}
