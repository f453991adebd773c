//! Waveform summaries for display.

use super::AudioBuffer;
use serde::{Deserialize, Serialize};

/// Sample range covered by one horizontal pixel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WaveformPoint {
    /// Lowest sample in the bucket.
    pub min: f32,
    /// Highest sample in the bucket.
    pub max: f32,
}

/// Reduce channel 0 of `buffer` to `pixel_width` min/max pairs.
///
/// Buckets are `ceil(len / pixel_width)` samples wide, so the final bucket
/// may be partial and trailing buckets may be empty. NaN and infinite
/// samples are skipped; a bucket with no finite samples is reported as
/// `{ min: 0.0, max: 0.0 }`.
#[must_use]
pub fn sample(buffer: &AudioBuffer, pixel_width: u32) -> Vec<WaveformPoint> {
    let width = pixel_width as usize;
    let samples = buffer.channel(0).unwrap_or_default();
    let step = samples.len().div_ceil(width.max(1));

    (0..width)
        .map(|bucket| {
            let start = (bucket * step).min(samples.len());
            let end = (start + step).min(samples.len());
            bucket_extent(&samples[start..end])
        })
        .collect()
}

fn bucket_extent(bucket: &[f32]) -> WaveformPoint {
    let mut finite = bucket.iter().copied().filter(|s| s.is_finite());
    let Some(first) = finite.next() else {
        return WaveformPoint::default();
    };

    finite.fold(
        WaveformPoint {
            min: first,
            max: first,
        },
        |point, s| WaveformPoint {
            min: point.min.min(s),
            max: point.max.max(s),
        },
    )
}
