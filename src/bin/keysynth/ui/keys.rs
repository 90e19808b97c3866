//! Terminal key events to synth keys.
//!
//! With keyboard enhancement the terminal reports press, repeat and release
//! separately, and modifier keys on their own. Without it only presses
//! arrive, so held notes are released by a timer instead.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, ModifierKeyCode};
use keysynth::io::keymap::Key;

/// What one terminal event means for the synth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Press(Key),
    Release(Key),
    Quit,
}

pub fn translate(event: &KeyEvent) -> Option<KeyInput> {
    if event.code == KeyCode::Esc {
        return (event.kind == KeyEventKind::Press).then_some(KeyInput::Quit);
    }
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Modifier(ModifierKeyCode::LeftShift) => Key::Shift,
        KeyCode::Modifier(ModifierKeyCode::RightShift) => Key::RightShift,
        KeyCode::Modifier(ModifierKeyCode::LeftControl) => Key::LeftControl,
        _ => return None,
    };
    match event.kind {
        KeyEventKind::Press => Some(KeyInput::Press(key)),
        KeyEventKind::Release => Some(KeyInput::Release(key)),
        KeyEventKind::Repeat => None,
    }
}

/// Timed releases for terminals that never report key-up.
pub struct FallbackReleases {
    hold: Duration,
    pending: Vec<(Key, Instant)>,
}

impl FallbackReleases {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            pending: Vec::new(),
        }
    }

    /// Record a press. Returns false when the key is already held, in which
    /// case the press is an auto-repeat and only extends the hold.
    pub fn press(&mut self, key: Key, now: Instant) -> bool {
        let deadline = now + self.hold;
        let key = normalize(key);
        if let Some((_, held_until)) = self.pending.iter_mut().find(|(k, _)| *k == key) {
            *held_until = deadline;
            return false;
        }
        self.pending.push((key, deadline));
        true
    }

    /// Keys whose hold ran out by `now`.
    pub fn expired(&mut self, now: Instant) -> Vec<Key> {
        let mut released = Vec::new();
        self.pending.retain(|&(key, deadline)| {
            if deadline <= now {
                released.push(key);
                false
            } else {
                true
            }
        });
        released
    }

    /// Everything still held, emptied (used on exit).
    pub fn drain(&mut self) -> Vec<Key> {
        self.pending.drain(..).map(|(key, _)| key).collect()
    }
}

fn normalize(key: Key) -> Key {
    match key {
        Key::Char(c) => Key::Char(c.to_ascii_uppercase()),
        other => other,
    }
}
