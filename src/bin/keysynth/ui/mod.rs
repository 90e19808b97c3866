//! Terminal UI: key handling, status bar, scope and spectrum.

mod keys;
mod spectrum;
mod status;
mod waveform;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event};
use keysynth::{
    synth::{NoteRegistry, SynthState},
    InputDispatcher,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use tracing::debug;

pub use keys::FallbackReleases;

use keys::{translate, KeyInput};
use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, Levels, StatusView};
use waveform::render_scope;

/// Samples kept for the scope and the FFT window.
pub const SCOPE_LEN: usize = 2048;

const HELP: &str = " [1-4] wave  [5/6] samples  [7] LPF  [8] HPF  [9] rhythm  [0] master LPF  [letters] play  [Esc] quit";

pub struct UiApp {
    dispatcher: InputDispatcher,
    state: Arc<SynthState>,
    notes: Arc<NoteRegistry>,
    scope_rx: Consumer<f32>,
    scope: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    sample_rate: f32,
    /// `None` when the terminal reports key releases itself.
    fallback: Option<FallbackReleases>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        dispatcher: InputDispatcher,
        state: Arc<SynthState>,
        notes: Arc<NoteRegistry>,
        scope_rx: Consumer<f32>,
        sample_rate: f32,
        fallback: Option<FallbackReleases>,
    ) -> Self {
        Self {
            dispatcher,
            state,
            notes,
            scope_rx,
            scope: vec![0.0; SCOPE_LEN],
            spectrum: SpectrumAnalyzer::new(SCOPE_LEN, sample_rate),
            sample_rate,
            fallback,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_scope();
            self.release_expired(Instant::now());

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        if let Some(input) = translate(&key) {
                            self.handle_input(input);
                        }
                    }
                }
            }
        }

        if let Some(fallback) = self.fallback.as_mut() {
            for key in fallback.drain() {
                self.dispatcher.on_key(key, false);
            }
        }
        Ok(())
    }

    fn handle_input(&mut self, input: KeyInput) {
        match input {
            KeyInput::Quit => self.should_quit = true,
            KeyInput::Press(key) => {
                if let Some(fallback) = self.fallback.as_mut() {
                    if !fallback.press(key, Instant::now()) {
                        return;
                    }
                }
                let action = self.dispatcher.on_key(key, true);
                debug!(?action, "key press");
            }
            KeyInput::Release(key) => {
                self.dispatcher.on_key(key, false);
            }
        }
    }

    fn release_expired(&mut self, now: Instant) {
        let Some(fallback) = self.fallback.as_mut() else {
            return;
        };
        for key in fallback.expired(now) {
            self.dispatcher.on_key(key, false);
        }
    }

    /// Append whatever the audio thread rendered, keeping the newest window.
    fn poll_scope(&mut self) {
        let before = self.scope.len();
        while let Ok(sample) = self.scope_rx.pop() {
            self.scope.push(sample);
        }
        if self.scope.len() == before {
            return;
        }
        if self.scope.len() > SCOPE_LEN {
            let excess = self.scope.len() - SCOPE_LEN;
            self.scope.drain(..excess);
        }
        self.spectrum.update(&self.scope);
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),  // Status
                Constraint::Min(8),     // Scope
                Constraint::Length(12), // Spectrum
                Constraint::Length(1),  // Help
            ])
            .split(frame.area());

        let view = StatusView {
            params: self.state.report(),
            notes: self.notes.len(),
            seconds: self.state.sample_clock() as f64 / self.sample_rate as f64,
            sample_rate: self.sample_rate,
            levels: Levels::measure(&self.scope),
            releases_reported: self.fallback.is_none(),
        };
        render_status(frame, chunks[0], &view);
        render_scope(frame, chunks[1], &self.scope);
        render_spectrum(frame, chunks[2], &self.spectrum);

        let help = Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
