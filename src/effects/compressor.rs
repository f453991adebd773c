//! Feed-forward dynamics compressor.
//!
//! Peak level detection in the dB domain, a soft-knee gain computer, and
//! one-pole attack/release smoothing of the gain reduction. No makeup gain
//! is applied.

/// Compressor settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compressor {
    /// Threshold level in dB.
    pub threshold_db: f64,
    /// Compression ratio (12.0 means 12:1).
    pub ratio: f64,
    /// Knee width in dB (0 = hard knee).
    pub knee_db: f64,
    /// Attack time in seconds.
    pub attack_secs: f64,
    /// Release time in seconds.
    pub release_secs: f64,
}

/// Level reported for digital silence.
const SILENCE_DB: f64 = -120.0;

impl Compressor {
    /// Static gain change in dB (zero or negative) for an input level in dB.
    #[must_use]
    pub fn gain_reduction_db(&self, level_db: f64) -> f64 {
        let over = level_db - self.threshold_db;
        let slope = 1.0 / self.ratio - 1.0;

        if 2.0 * over < -self.knee_db {
            0.0
        } else if self.knee_db > 0.0 && 2.0 * over <= self.knee_db {
            let into_knee = over + self.knee_db / 2.0;
            slope * into_knee * into_knee / (2.0 * self.knee_db)
        } else {
            slope * over
        }
    }

    /// Compress `input` starting from unity gain.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn render(&self, input: &[f32], sample_rate: u32) -> Vec<f32> {
        let attack = smoothing_coeff(self.attack_secs, sample_rate);
        let release = smoothing_coeff(self.release_secs, sample_rate);
        let mut gain_db = 0.0_f64;

        input
            .iter()
            .map(|&sample| {
                let x = f64::from(sample);
                let target = self.gain_reduction_db(linear_to_db(x.abs()));

                // More reduction engages at attack speed, recovery at release speed.
                let coeff = if target < gain_db { attack } else { release };
                gain_db = coeff * gain_db + (1.0 - coeff) * target;

                (x * db_to_linear(gain_db)) as f32
            })
            .collect()
    }
}

/// One-pole coefficient reaching ~63% of a step after `time_secs`.
#[allow(clippy::cast_precision_loss)]
fn smoothing_coeff(time_secs: f64, sample_rate: u32) -> f64 {
    let samples = time_secs * f64::from(sample_rate);
    if samples > 0.0 {
        (-1.0 / samples).exp()
    } else {
        0.0
    }
}

fn linear_to_db(linear: f64) -> f64 {
    if linear > 0.0 {
        (20.0 * linear.log10()).max(SILENCE_DB)
    } else {
        SILENCE_DB
    }
}

fn db_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}
