//! Error types for voxtrim.

use crate::pipeline::Stage;

/// Result type alias for voxtrim application operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Violation of the [`AudioBuffer`](crate::audio::AudioBuffer) layout invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// Buffer has no channels.
    #[error("audio buffer must have at least one channel")]
    NoChannels,

    /// More channels than the container can describe.
    #[error("audio buffer has {count} channels (maximum 255)")]
    TooManyChannels {
        /// Number of channels supplied.
        count: usize,
    },

    /// Sample rate of zero.
    #[error("sample rate must be greater than zero")]
    ZeroSampleRate,

    /// Channels of differing length.
    #[error("channel {channel} has {actual} samples, expected {expected}")]
    ChannelLengthMismatch {
        /// Index of the offending channel.
        channel: usize,
        /// Length of channel 0.
        expected: usize,
        /// Length of the offending channel.
        actual: usize,
    },
}

/// Failure to turn compressed input into PCM.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The container could not be recognised.
    #[error("unrecognised or malformed audio container")]
    UnknownFormat {
        /// Underlying decoder error.
        #[source]
        source: symphonia::core::errors::Error,
    },

    /// No audio track found.
    #[error("no audio tracks found in input")]
    NoAudioTrack,

    /// The track does not declare a sample rate.
    #[error("audio track is missing a sample rate")]
    MissingSampleRate,

    /// No decoder is available for the track codec.
    #[error("unsupported audio codec")]
    UnsupportedCodec {
        /// Underlying decoder error.
        #[source]
        source: symphonia::core::errors::Error,
    },

    /// Reading or decoding a packet failed.
    #[error("failed to decode audio packet")]
    Packet {
        /// Underlying decoder error.
        #[source]
        source: symphonia::core::errors::Error,
    },

    /// Stream has more channels than a WAV header can carry.
    #[error("audio has {count} channels (maximum 255)")]
    TooManyChannels {
        /// Number of channels reported by the decoder.
        count: usize,
    },

    /// Channel count changed between packets.
    #[error("channel count changed mid-stream from {expected} to {actual}")]
    ChannelLayoutChanged {
        /// Channel count of the first packet.
        expected: usize,
        /// Channel count of the offending packet.
        actual: usize,
    },

    /// Stream decoded to zero frames.
    #[error("input contains no audio frames")]
    Empty,

    /// Decoded samples did not form a valid buffer.
    #[error("decoded audio has an invalid layout")]
    Layout(#[from] BufferError),
}

/// Trim region rejected against a buffer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrimError {
    /// Region is empty, reversed, or outside the buffer.
    #[error(
        "invalid trim region {start_fraction}..{end_fraction} for {length} samples"
    )]
    InvalidRegion {
        /// Requested start as a fraction of the length.
        start_fraction: f64,
        /// Requested end as a fraction of the length.
        end_fraction: f64,
        /// Buffer length in frames.
        length: usize,
    },
}

/// Failure while rendering a voice effect.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EffectError {
    /// The stage frequency cannot be represented at this sample rate.
    #[error("{effect}: {frequency_hz} Hz is not below the Nyquist frequency of {sample_rate} Hz audio")]
    CutoffAboveNyquist {
        /// Effect name.
        effect: &'static str,
        /// Stage frequency in Hz.
        frequency_hz: f64,
        /// Buffer sample rate in Hz.
        sample_rate: u32,
    },

    /// The stage produced NaN or infinite samples.
    #[error("{effect}: rendering produced non-finite samples on channel {channel}")]
    NonFinite {
        /// Effect name.
        effect: &'static str,
        /// Channel that went non-finite.
        channel: usize,
    },
}

/// Failure to serialize PCM into a WAV container.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Data chunk exceeds the 32-bit RIFF size field.
    #[error("audio data of {bytes} bytes does not fit in a WAV container")]
    DataTooLarge {
        /// Size of the data chunk that was requested.
        bytes: u64,
    },

    /// Byte rate exceeds the 32-bit header field.
    #[error("{sample_rate} Hz with {channel_count} channel(s) overflows the WAV byte rate field")]
    ByteRateOverflow {
        /// Buffer sample rate in Hz.
        sample_rate: u32,
        /// Buffer channel count.
        channel_count: u8,
    },
}

/// Failure of the decode, trim, effect, encode pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// Decoding failed.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Trimming failed.
    #[error("trim failed: {0}")]
    Trim(#[from] TrimError),

    /// Effect rendering failed.
    #[error("effect failed: {0}")]
    Effect(#[from] EffectError),

    /// Encoding failed.
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// The run was cancelled before the given stage started.
    #[error("processing cancelled before {stage}")]
    Cancelled {
        /// Stage that was about to run.
        stage: Stage,
    },
}

impl ProcessError {
    /// Stage in which this error occurred.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::Decode(_) => Stage::Decode,
            Self::Trim(_) => Stage::Trim,
            Self::Effect(_) => Stage::Effect,
            Self::Encode(_) => Stage::Encode,
            Self::Cancelled { stage } => *stage,
        }
    }

    /// Whether the run was cancelled rather than failed.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Top-level error type for voxtrim.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Failed to read an input recording.
    #[error("failed to read input '{path}'")]
    InputRead {
        /// Path to the input file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("failed to write output '{path}'")]
    OutputWrite {
        /// Path to the output file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize waveform data.
    #[error("failed to serialize waveform")]
    WaveformSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Trim handles are too close together or out of order.
    #[error(
        "trim start ({start_percent}%) must be more than {min_gap}% before trim end ({end_percent}%)"
    )]
    TrimHandles {
        /// Start handle, in percent.
        start_percent: f64,
        /// End handle, in percent.
        end_percent: f64,
        /// Required gap, in percent.
        min_gap: f64,
    },

    /// Processing pipeline failed.
    #[error(transparent)]
    Process(#[from] ProcessError),
}
