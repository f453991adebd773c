//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use hound::{SampleFormat, WavSpec, WavWriter};
use std::f64::consts::PI;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// 16-bit PCM WAV bytes holding a 220 Hz sine on every channel.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn sine_wav(sample_rate: u32, channels: u16, frames: usize, amplitude: f64) -> Vec<u8> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..frames {
            let t = i as f64 / f64::from(sample_rate);
            let value = (amplitude * (2.0 * PI * 220.0 * t).sin() * 32_767.0).round() as i16;
            for _ in 0..channels {
                writer.write_sample(value).unwrap();
            }
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

/// Two seconds of mono speech-band audio at 44.1 kHz.
pub fn two_second_recording() -> Vec<u8> {
    sine_wav(44_100, 1, 88_200, 0.5)
}

/// Write `bytes` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Little-endian `u32` at `offset`.
pub fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

/// Little-endian `u16` at `offset`.
pub fn u16_at(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
}

/// Samples per 20 ms Opus frame at 48 kHz.
pub const OPUS_FRAME_SAMPLES: usize = 960;

/// Ogg Opus stream of `packets` 20 ms frames.
///
/// Each audio packet is a lone TOC byte (CELT fullband, 20 ms, one frame of
/// zero length), which an Opus decoder renders as silence.
pub fn ogg_opus_silence(channels: u8, packets: usize) -> Vec<u8> {
    let mut head = b"OpusHead".to_vec();
    head.push(1); // version
    head.push(channels);
    head.extend_from_slice(&0u16.to_le_bytes()); // pre-skip
    head.extend_from_slice(&48_000u32.to_le_bytes());
    head.extend_from_slice(&0i16.to_le_bytes()); // output gain
    head.push(0); // channel mapping family

    let vendor = b"voxtrim tests";
    let mut tags = b"OpusTags".to_vec();
    tags.extend_from_slice(&u32::try_from(vendor.len()).unwrap().to_le_bytes());
    tags.extend_from_slice(vendor);
    tags.extend_from_slice(&0u32.to_le_bytes());

    let toc = if channels > 1 { 0xFC } else { 0xF8 };
    let audio = vec![toc; packets];
    let lacing = vec![1u8; packets];
    let granule = u64::try_from(packets * OPUS_FRAME_SAMPLES).unwrap();

    let mut stream = ogg_page(0x02, 0, 0, &[u8::try_from(head.len()).unwrap()], &head);
    stream.extend(ogg_page(0x00, 0, 1, &[u8::try_from(tags.len()).unwrap()], &tags));
    stream.extend(ogg_page(0x04, granule, 2, &lacing, &audio));
    stream
}

fn ogg_page(header_type: u8, granule: u64, sequence: u32, lacing: &[u8], body: &[u8]) -> Vec<u8> {
    let mut page = b"OggS".to_vec();
    page.push(0); // version
    page.push(header_type);
    page.extend_from_slice(&granule.to_le_bytes());
    page.extend_from_slice(&0x766f_7874u32.to_le_bytes()); // serial
    page.extend_from_slice(&sequence.to_le_bytes());
    page.extend_from_slice(&0u32.to_le_bytes()); // checksum placeholder
    page.push(u8::try_from(lacing.len()).unwrap());
    page.extend_from_slice(lacing);
    page.extend_from_slice(body);

    let crc = ogg_crc(&page);
    page[22..26].copy_from_slice(&crc.to_le_bytes());
    page
}

/// CRC-32 as used by Ogg: polynomial 0x04C11DB7, no reflection, zero init.
fn ogg_crc(data: &[u8]) -> u32 {
    data.iter().fold(0u32, |mut crc, &byte| {
        crc ^= u32::from(byte) << 24;
        for _ in 0..8 {
            crc = if crc & 0x8000_0000 == 0 {
                crc << 1
            } else {
                (crc << 1) ^ 0x04C1_1DB7
            };
        }
        crc
    })
}
