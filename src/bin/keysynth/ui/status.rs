//! Status bar: synth parameters, voice count and output level.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use keysynth::synth::ParamReport;

/// Output level over the scope window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Levels {
    pub peak: f32,
    pub rms: f32,
}

impl Levels {
    pub fn measure(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self::default();
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub struct StatusView {
    pub params: ParamReport,
    pub notes: usize,
    pub seconds: f64,
    pub sample_rate: f32,
    pub levels: Levels,
    pub releases_reported: bool,
}

pub fn render_status(frame: &mut Frame, area: Rect, view: &StatusView) {
    let block = Block::default().title(" keysynth ").borders(Borders::ALL);

    let params = Line::from(vec![
        Span::styled(
            format!(" {}  ", view.params),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("rhythm: {}", if view.params.rhythm_on { "on" } else { "off" }),
            Style::default().fg(if view.params.rhythm_on {
                Color::Green
            } else {
                Color::DarkGray
            }),
        ),
    ]);

    let meters = Line::from(vec![
        Span::styled(
            format!(" notes: {:<3} ", view.notes),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:>8.1}s  ", view.seconds),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:.1}kHz  ", view.sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}  ", view.levels.peak, view.levels.rms),
            Style::default().fg(if view.levels.peak > 1.0 {
                Color::Red
            } else {
                Color::Magenta
            }),
        ),
        Span::styled(
            if view.releases_reported {
                "key-up: reported"
            } else {
                "key-up: timed"
            },
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(vec![params, meters]).block(block);
    frame.render_widget(paragraph, area);
}
