//! Sample-accurate trimming.

use super::AudioBuffer;
use crate::error::TrimError;
use tracing::debug;

/// Portion of a recording to keep, as fractions of its length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimRegion {
    /// Start of the kept range, in `[0, 1]`.
    pub start_fraction: f64,
    /// End of the kept range, in `[0, 1]`.
    pub end_fraction: f64,
}

impl TrimRegion {
    /// The whole recording.
    pub const FULL: Self = Self {
        start_fraction: 0.0,
        end_fraction: 1.0,
    };

    /// Create a region from fractions.
    ///
    /// Returns `None` unless `0 <= start < end <= 1`.
    #[must_use]
    pub fn new(start_fraction: f64, end_fraction: f64) -> Option<Self> {
        let region = Self {
            start_fraction,
            end_fraction,
        };
        region.is_well_formed().then_some(region)
    }

    /// Create a region from percentages in `[0, 100]`.
    #[must_use]
    pub fn from_percent(start_percent: f64, end_percent: f64) -> Option<Self> {
        Self::new(start_percent / 100.0, end_percent / 100.0)
    }

    fn is_well_formed(&self) -> bool {
        (0.0..=1.0).contains(&self.start_fraction)
            && (0.0..=1.0).contains(&self.end_fraction)
            && self.start_fraction < self.end_fraction
    }

    /// Sample indices `[start, end)` this region selects in a buffer of `length` frames.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn sample_range(&self, length: usize) -> Option<(usize, usize)> {
        if !self.start_fraction.is_finite() || !self.end_fraction.is_finite() {
            return None;
        }

        let len = length as f64;
        let start = (self.start_fraction * len).floor();
        let end = (self.end_fraction * len).floor();

        if start < 0.0 || end > len || end <= start {
            return None;
        }

        Some((start as usize, end as usize))
    }
}

impl Default for TrimRegion {
    fn default() -> Self {
        Self::FULL
    }
}

/// Extract the frames selected by `region` into a new buffer.
///
/// `start = floor(start_fraction * len)` and `end = floor(end_fraction * len)`;
/// the output holds `end - start` frames on every channel.
///
/// # Errors
///
/// Returns [`TrimError::InvalidRegion`] if the region selects no frames or
/// reaches outside the buffer.
pub fn trim(buffer: &AudioBuffer, region: TrimRegion) -> Result<AudioBuffer, TrimError> {
    let length = buffer.len();
    let (start, end) = region
        .sample_range(length)
        .ok_or(TrimError::InvalidRegion {
            start_fraction: region.start_fraction,
            end_fraction: region.end_fraction,
            length,
        })?;

    debug!("Trimming frames {start}..{end} of {length}");

    let channels = buffer
        .channels()
        .map(|samples| samples[start..end].to_vec())
        .collect();

    Ok(buffer.with_channels(channels))
}
