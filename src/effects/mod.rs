//! Voice effects.
//!
//! Each [`EffectSpec`] maps to one fixed filter stage that is rendered
//! offline over every channel of a buffer.

mod biquad;
mod compressor;

pub use biquad::Biquad;
pub use compressor::Compressor;

use crate::audio::{AudioBuffer, Session, SessionKind};
use crate::constants::effects;
use crate::error::EffectError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Voice effect selected for a recording.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectSpec {
    /// Leave the audio untouched.
    #[default]
    None,
    /// Soft, muffled narration (lowpass).
    Storyteller,
    /// Fuller low end (low-shelf boost).
    Warm,
    /// Remove rumble (highpass).
    Clear,
    /// Even out loud and quiet passages (compressor).
    Gentle,
}

impl EffectSpec {
    /// Every effect, in menu order.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Storyteller,
        Self::Warm,
        Self::Clear,
        Self::Gentle,
    ];

    /// Lowercase effect name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Storyteller => "storyteller",
            Self::Warm => "warm",
            Self::Clear => "clear",
            Self::Gentle => "gentle",
        }
    }

    /// Build the filter stage for this effect at `sample_rate`.
    fn stage(self, sample_rate: u32) -> Result<Option<FilterStage>, EffectError> {
        let stage = match self {
            Self::None => return Ok(None),
            Self::Storyteller => {
                self.check_nyquist(effects::STORYTELLER_CUTOFF_HZ, sample_rate)?;
                FilterStage::Biquad(Biquad::lowpass(
                    effects::STORYTELLER_CUTOFF_HZ,
                    effects::BUTTERWORTH_Q,
                    sample_rate,
                ))
            }
            Self::Warm => {
                self.check_nyquist(effects::WARM_CORNER_HZ, sample_rate)?;
                FilterStage::Biquad(Biquad::low_shelf(
                    effects::WARM_CORNER_HZ,
                    effects::WARM_GAIN_DB,
                    effects::SHELF_SLOPE,
                    sample_rate,
                ))
            }
            Self::Clear => {
                self.check_nyquist(effects::CLEAR_CUTOFF_HZ, sample_rate)?;
                FilterStage::Biquad(Biquad::highpass(
                    effects::CLEAR_CUTOFF_HZ,
                    effects::BUTTERWORTH_Q,
                    sample_rate,
                ))
            }
            Self::Gentle => FilterStage::Compressor(Compressor {
                threshold_db: effects::GENTLE_THRESHOLD_DB,
                ratio: effects::GENTLE_RATIO,
                knee_db: effects::GENTLE_KNEE_DB,
                attack_secs: effects::GENTLE_ATTACK_SECS,
                release_secs: effects::GENTLE_RELEASE_SECS,
            }),
        };
        Ok(Some(stage))
    }

    fn check_nyquist(self, frequency_hz: f64, sample_rate: u32) -> Result<(), EffectError> {
        if frequency_hz < f64::from(sample_rate) / 2.0 {
            Ok(())
        } else {
            Err(EffectError::CutoffAboveNyquist {
                effect: self.name(),
                frequency_hz,
                sample_rate,
            })
        }
    }
}

impl std::fmt::Display for EffectSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for EffectSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "storyteller" => Ok(Self::Storyteller),
            "warm" => Ok(Self::Warm),
            "clear" => Ok(Self::Clear),
            "gentle" => Ok(Self::Gentle),
            other => Err(format!(
                "unknown effect: {other} (expected one of none, storyteller, warm, clear, gentle)"
            )),
        }
    }
}

enum FilterStage {
    Biquad(Biquad),
    Compressor(Compressor),
}

impl FilterStage {
    fn render(&self, samples: &[f32], sample_rate: u32) -> Vec<f32> {
        match self {
            Self::Biquad(filter) => filter.render(samples),
            Self::Compressor(compressor) => compressor.render(samples, sample_rate),
        }
    }
}

/// Render `effect` over every channel of `buffer` into a new buffer.
///
/// [`EffectSpec::None`] returns an identical copy.
///
/// # Errors
///
/// Returns an error if the effect cannot be rendered at the buffer's sample
/// rate or produces non-finite samples. Unprocessed audio is never returned
/// in place of a failed render.
pub fn apply(buffer: &AudioBuffer, effect: EffectSpec) -> Result<AudioBuffer, EffectError> {
    let sample_rate = buffer.sample_rate();
    let Some(stage) = effect.stage(sample_rate)? else {
        return Ok(buffer.clone());
    };

    let _session = Session::open(SessionKind::Render);
    debug!(
        "Rendering {effect} over {} channel(s), {} frames",
        buffer.channel_count(),
        buffer.len()
    );

    let mut rendered = Vec::with_capacity(usize::from(buffer.channel_count()));
    for (channel, samples) in buffer.channels().enumerate() {
        let output = stage.render(samples, sample_rate);
        if output.iter().any(|s| !s.is_finite()) {
            return Err(EffectError::NonFinite {
                effect: effect.name(),
                channel,
            });
        }
        rendered.push(output);
    }

    Ok(buffer.with_channels(rendered))
}
