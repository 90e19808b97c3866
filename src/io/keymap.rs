//! Computer keyboard layout: control bindings and the note table.
//!
//! Three letter rows form a chromatic keyboard, one octave apart. Each row
//! starts on A and climbs eleven semitones:
//!
//! ```text
//!   Q W E R T Y U I O P [        octave 3
//!    A S D F G H J K L ; '       octave 2
//!     Z X C V B N M , . / RShift octave 1
//!   Shift = octave 0 degree 5, LeftCtrl = octave 0 degree 0
//! ```

use crate::{
    dsp::oscillator::{note_to_frequency, Waveform},
    io::samples::SampleSlot,
};

/// A physical key as reported by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable key. Letters are matched case-insensitively.
    Char(char),
    /// Shift when the side is not reported, or left shift.
    Shift,
    RightShift,
    LeftControl,
}

/// Non-note bindings. These fire on key press only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    SelectWaveform(Waveform),
    TriggerSample(SampleSlot),
    CycleLowPass,
    CycleHighPass,
    ToggleRhythm,
    ToggleMasterFilter,
}

const TOP_ROW: [char; 11] = ['Q', 'W', 'E', 'R', 'T', 'Y', 'U', 'I', 'O', 'P', '['];
const HOME_ROW: [char; 11] = ['A', 'S', 'D', 'F', 'G', 'H', 'J', 'K', 'L', ';', '\''];
const BOTTOM_ROW: [char; 10] = ['Z', 'X', 'C', 'V', 'B', 'N', 'M', ',', '.', '/'];

pub fn control_for(key: Key) -> Option<Control> {
    let Key::Char(c) = key else {
        return None;
    };
    let control = match c {
        '1' => Control::SelectWaveform(Waveform::Sine),
        '2' => Control::SelectWaveform(Waveform::Saw),
        '3' => Control::SelectWaveform(Waveform::Square),
        '4' => Control::SelectWaveform(Waveform::Triangle),
        '5' => Control::TriggerSample(SampleSlot::A),
        '6' => Control::TriggerSample(SampleSlot::B),
        '7' => Control::CycleLowPass,
        '8' => Control::CycleHighPass,
        '9' => Control::ToggleRhythm,
        '0' => Control::ToggleMasterFilter,
        _ => return None,
    };
    Some(control)
}

/// `(octave, degree)` for a note key.
pub fn note_position(key: Key) -> Option<(i32, i32)> {
    match key {
        Key::Shift => Some((0, 5)),
        Key::LeftControl => Some((0, 0)),
        Key::RightShift => Some((1, 10)),
        Key::Char(c) => {
            let c = c.to_ascii_uppercase();
            let rows: [(&[char], i32); 3] = [
                (&TOP_ROW[..], 3),
                (&HOME_ROW[..], 2),
                (&BOTTOM_ROW[..], 1),
            ];
            rows.iter().find_map(|&(row, octave)| {
                row.iter()
                    .position(|&k| k == c)
                    .map(|degree| (octave, degree as i32))
            })
        }
    }
}

/// Pitch of a note key, `None` for unmapped keys.
pub fn note_frequency(key: Key) -> Option<f32> {
    note_position(key).map(|(octave, degree)| note_to_frequency(octave, degree))
}
