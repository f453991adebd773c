//! Configuration type definitions.

use crate::constants::DEFAULT_WAVEFORM_WIDTH;
use crate::effects::EffectSpec;
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default processing settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Waveform rendering settings.
    #[serde(default)]
    pub waveform: WaveformConfig,
}

/// Default processing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Effect applied when none is given on the command line.
    pub effect: EffectSpec,

    /// Return the original recording when a stage fails.
    pub fallback: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            effect: EffectSpec::None,
            fallback: true,
        }
    }
}

/// Waveform rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformConfig {
    /// Number of pixel buckets.
    pub width: u32,
}

impl Default for WaveformConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WAVEFORM_WIDTH,
        }
    }
}
