//! Spectrum of the scope window.
//!
//! Bins are log-spaced between 20 Hz and Nyquist and plotted evenly, so the
//! filter sweeps read as a moving slope instead of bunching on the left.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

const SPECTRUM_BINS: usize = 64;
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    /// FFT bin per displayed point.
    bin_indices: Vec<usize>,
    /// Edge labels for the x axis.
    low_hz: f64,
    high_hz: f64,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// `(position 0..1, magnitude dB)`.
    points: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft_len = fft_len.max(2);
        let fft = FftPlanner::new().plan_fft_forward(fft_len);

        // Hann
        let denom = (fft_len - 1) as f32;
        let window = (0..fft_len)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        let nyquist = (sample_rate as f64 / 2.0).max(40.0);
        let low_hz = 20.0;
        let high_hz = nyquist.min(20_000.0);
        let half = fft_len / 2;
        let bin_indices = (0..SPECTRUM_BINS)
            .map(|i| {
                let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
                let freq = low_hz * (high_hz / low_hz).powf(t);
                let index = (freq * fft_len as f64 / sample_rate as f64).round() as usize;
                index.min(half - 1)
            })
            .collect();

        let points = (0..SPECTRUM_BINS)
            .map(|i| (i as f64 / (SPECTRUM_BINS - 1) as f64, FLOOR_DB))
            .collect();

        Self {
            window,
            bin_indices,
            low_hz,
            high_hz,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            points,
        }
    }

    pub fn fft_len(&self) -> usize {
        self.window.len()
    }

    /// Recompute from the newest `fft_len` samples. Shorter input is ignored.
    pub fn update(&mut self, samples: &[f32]) {
        let Some(start) = samples.len().checked_sub(self.window.len()) else {
            return;
        };
        let recent = &samples[start..];

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(recent).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for (point, &index) in self.points.iter_mut().zip(&self.bin_indices) {
            let power = self.scratch[index].norm_sqr().max(1e-12);
            point.1 = (10.0 * (power as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, analyzer: &SpectrumAnalyzer) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let points = analyzer.points();
    let max_db = points.iter().map(|&(_, db)| db).fold(FLOOR_DB, f64::max);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .labels(vec![
                    format!("{:.0}Hz", analyzer.low_hz),
                    format!("{:.0}Hz", (analyzer.low_hz * analyzer.high_hz).sqrt()),
                    format!("{:.0}Hz", analyzer.high_hz),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
