//! Byte-exact 16-bit PCM WAV encoding.

use super::AudioBuffer;
use crate::constants::wav;
use crate::error::EncodeError;
use tracing::debug;

/// Serialize `buffer` as a canonical 44-byte-header RIFF/WAVE PCM16 file.
///
/// Frames are interleaved channel by channel. Samples are clamped to
/// `[-1, 1]`; negative values scale by 32768 and the rest by 32767, so both
/// ends of the range map onto `i16` without overflow.
///
/// # Errors
///
/// Returns an error if the data chunk or the byte rate does not fit the
/// 32-bit RIFF header fields.
pub fn encode(buffer: &AudioBuffer) -> Result<Vec<u8>, EncodeError> {
    let channel_count = u16::from(buffer.channel_count());
    let block_align = channel_count * wav::BYTES_PER_SAMPLE;

    let data_bytes = buffer.len() as u64 * u64::from(block_align);
    let data_size = u32::try_from(data_bytes)
        .ok()
        .filter(|size| size.checked_add(wav::RIFF_OVERHEAD).is_some())
        .ok_or(EncodeError::DataTooLarge { bytes: data_bytes })?;

    let sample_rate = buffer.sample_rate();
    let byte_rate = sample_rate
        .checked_mul(u32::from(block_align))
        .ok_or(EncodeError::ByteRateOverflow {
            sample_rate,
            channel_count: buffer.channel_count(),
        })?;

    let mut out = Vec::with_capacity(wav::HEADER_LEN + data_size as usize);

    // RIFF chunk descriptor
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(wav::RIFF_OVERHEAD + data_size).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt sub-chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&wav::FMT_CHUNK_LEN.to_le_bytes());
    out.extend_from_slice(&wav::FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&channel_count.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&wav::BITS_PER_SAMPLE.to_le_bytes());

    // data sub-chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());

    let channels: Vec<&[f32]> = buffer.channels().collect();
    for frame in 0..buffer.len() {
        for channel in &channels {
            out.extend_from_slice(&quantize(channel[frame]).to_le_bytes());
        }
    }

    debug!(
        "Encoded {} frames as {} bytes of WAV",
        buffer.len(),
        out.len()
    );

    Ok(out)
}

/// Convert a float sample to a signed 16-bit value.
///
/// The product is formed in f64 so it is exact before rounding.
#[allow(clippy::cast_possible_truncation)]
fn quantize(sample: f32) -> i16 {
    let s = f64::from(sample.clamp(-1.0, 1.0));
    if s < 0.0 {
        (s * wav::NEGATIVE_SCALE).round() as i16
    } else {
        (s * wav::POSITIVE_SCALE).round() as i16
    }
}
