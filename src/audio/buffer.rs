//! Deinterleaved PCM buffer shared by every pipeline stage.

use crate::error::BufferError;

/// Decoded audio as per-channel f32 samples.
///
/// Every channel holds the same number of frames. Stages never mutate a
/// buffer; they build a new one with [`AudioBuffer::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Create a buffer from per-channel samples.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no channels, more than 255 channels,
    /// a zero sample rate, or channels of unequal length.
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self, BufferError> {
        if sample_rate == 0 {
            return Err(BufferError::ZeroSampleRate);
        }

        let Some(first) = channels.first() else {
            return Err(BufferError::NoChannels);
        };

        if channels.len() > usize::from(u8::MAX) {
            return Err(BufferError::TooManyChannels {
                count: channels.len(),
            });
        }

        let expected = first.len();
        if let Some((channel, samples)) = channels
            .iter()
            .enumerate()
            .find(|(_, samples)| samples.len() != expected)
        {
            return Err(BufferError::ChannelLengthMismatch {
                channel,
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// Create a single-channel buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample rate is zero.
    pub fn mono(sample_rate: u32, samples: Vec<f32>) -> Result<Self, BufferError> {
        Self::new(sample_rate, vec![samples])
    }

    /// Build a buffer with the same sample rate from channels derived from this one.
    ///
    /// Callers must produce one channel per input channel, all of equal length.
    pub(crate) fn with_channels(&self, channels: Vec<Vec<f32>>) -> Self {
        debug_assert_eq!(channels.len(), self.channels.len());
        debug_assert!(channels.windows(2).all(|w| w[0].len() == w[1].len()));
        Self {
            sample_rate: self.sample_rate,
            channels,
        }
    }

    /// Sample rate in Hz.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn channel_count(&self) -> u8 {
        // Bounded by the constructor.
        self.channels.len() as u8
    }

    /// Number of frames (samples per channel).
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Whether the buffer holds no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Duration in seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / f64::from(self.sample_rate)
    }

    /// Samples of one channel, if it exists.
    #[must_use]
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Iterate over all channels in order.
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Consume the buffer, returning its per-channel samples.
    #[must_use]
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }
}
