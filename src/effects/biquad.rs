//! Second-order IIR filter stages.
//!
//! Coefficients follow the Audio EQ Cookbook (R. Bristow-Johnson).
//! Transfer function: H(z) = (b0 + b1*z^-1 + b2*z^-2) / (a0 + a1*z^-1 + a2*z^-2),
//! stored normalized by a0.

use std::f64::consts::PI;

/// Normalized biquad coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Biquad {
    /// Second-order lowpass.
    #[must_use]
    pub fn lowpass(frequency_hz: f64, q: f64, sample_rate: u32) -> Self {
        let (cos_w0, alpha) = Self::prewarp(frequency_hz, q, sample_rate);
        Self::normalized(
            (1.0 - cos_w0) / 2.0,
            1.0 - cos_w0,
            (1.0 - cos_w0) / 2.0,
            1.0 + alpha,
            -2.0 * cos_w0,
            1.0 - alpha,
        )
    }

    /// Second-order highpass.
    #[must_use]
    pub fn highpass(frequency_hz: f64, q: f64, sample_rate: u32) -> Self {
        let (cos_w0, alpha) = Self::prewarp(frequency_hz, q, sample_rate);
        Self::normalized(
            (1.0 + cos_w0) / 2.0,
            -(1.0 + cos_w0),
            (1.0 + cos_w0) / 2.0,
            1.0 + alpha,
            -2.0 * cos_w0,
            1.0 - alpha,
        )
    }

    /// Low-shelf with the given gain below the corner frequency.
    #[must_use]
    pub fn low_shelf(frequency_hz: f64, gain_db: f64, slope: f64, sample_rate: u32) -> Self {
        let a = 10.0_f64.powf(gain_db / 40.0);
        let w0 = 2.0 * PI * frequency_hz / f64::from(sample_rate);
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / 2.0 * ((a + 1.0 / a) * (1.0 / slope - 1.0) + 2.0).sqrt();
        let two_sqrt_a_alpha = 2.0 * a.sqrt() * alpha;

        Self::normalized(
            a * ((a + 1.0) - (a - 1.0) * cos_w0 + two_sqrt_a_alpha),
            2.0 * a * ((a - 1.0) - (a + 1.0) * cos_w0),
            a * ((a + 1.0) - (a - 1.0) * cos_w0 - two_sqrt_a_alpha),
            (a + 1.0) + (a - 1.0) * cos_w0 + two_sqrt_a_alpha,
            -2.0 * ((a - 1.0) + (a + 1.0) * cos_w0),
            (a + 1.0) + (a - 1.0) * cos_w0 - two_sqrt_a_alpha,
        )
    }

    fn prewarp(frequency_hz: f64, q: f64, sample_rate: u32) -> (f64, f64) {
        let w0 = 2.0 * PI * frequency_hz / f64::from(sample_rate);
        (w0.cos(), w0.sin() / (2.0 * q))
    }

    fn normalized(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }

    /// Run the filter over `input` from a silent initial state.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn render(&self, input: &[f32]) -> Vec<f32> {
        let (mut x1, mut x2, mut y1, mut y2) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);

        input
            .iter()
            .map(|&sample| {
                let x = f64::from(sample);
                let y = self.b0 * x + self.b1 * x1 + self.b2 * x2 - self.a1 * y1 - self.a2 * y2;
                x2 = x1;
                x1 = x;
                y2 = y1;
                y1 = y;
                y as f32
            })
            .collect()
    }
}
