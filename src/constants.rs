//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "voxtrim";

/// MIME type of the encoded output.
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// Default number of horizontal pixel buckets for waveform rendering.
pub const DEFAULT_WAVEFORM_WIDTH: u32 = 800;

/// Largest waveform width accepted from configuration or the command line.
pub const MAX_WAVEFORM_WIDTH: u32 = 16_384;

/// Minimum gap between trim handles, in percent, enforced at the UI boundary.
///
/// The library itself only requires `start < end`.
pub const MIN_TRIM_GAP_PERCENT: f64 = 1.0;

/// RIFF/WAVE container layout.
pub mod wav {
    /// Size of the canonical PCM header in bytes.
    pub const HEADER_LEN: usize = 44;
    /// Bytes of the RIFF chunk that precede the data payload, after the size field.
    pub const RIFF_OVERHEAD: u32 = 36;
    /// Size of the `fmt ` sub-chunk body for PCM.
    pub const FMT_CHUNK_LEN: u32 = 16;
    /// `AudioFormat` tag for integer PCM.
    pub const FORMAT_PCM: u16 = 1;
    /// Output bit depth.
    pub const BITS_PER_SAMPLE: u16 = 16;
    /// Bytes per output sample.
    pub const BYTES_PER_SAMPLE: u16 = BITS_PER_SAMPLE / 8;
    /// Scale applied to negative samples.
    pub const NEGATIVE_SCALE: f64 = 32_768.0;
    /// Scale applied to zero and positive samples.
    pub const POSITIVE_SCALE: f64 = 32_767.0;
}

/// Fixed voice effect settings.
pub mod effects {
    /// Storyteller lowpass cutoff in Hz.
    pub const STORYTELLER_CUTOFF_HZ: f64 = 3_000.0;
    /// Warm low-shelf corner frequency in Hz.
    pub const WARM_CORNER_HZ: f64 = 200.0;
    /// Warm low-shelf gain in dB.
    pub const WARM_GAIN_DB: f64 = 3.0;
    /// Clear highpass cutoff in Hz.
    pub const CLEAR_CUTOFF_HZ: f64 = 80.0;
    /// Gentle compressor threshold in dB.
    pub const GENTLE_THRESHOLD_DB: f64 = -24.0;
    /// Gentle compressor ratio.
    pub const GENTLE_RATIO: f64 = 12.0;
    /// Gentle compressor knee width in dB.
    pub const GENTLE_KNEE_DB: f64 = 30.0;
    /// Gentle compressor attack in seconds.
    pub const GENTLE_ATTACK_SECS: f64 = 0.003;
    /// Gentle compressor release in seconds.
    pub const GENTLE_RELEASE_SECS: f64 = 0.25;
    /// Butterworth quality factor used for lowpass and highpass stages.
    pub const BUTTERWORTH_Q: f64 = std::f64::consts::FRAC_1_SQRT_2;
    /// Shelf slope for low-shelf stages.
    pub const SHELF_SLOPE: f64 = 1.0;
}
